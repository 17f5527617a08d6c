//! Convert and reset transforms on files and clusters.

use crate::encoding::{Codec, recode};
use crate::metadata::{CLUSTER_FIELDS, Cluster, FILE_FIELDS, File, Metadata};

/// A validated pair of codecs to reinterpret text with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub source: Codec,
    pub target: Codec,
}

impl Conversion {
    pub fn new(source: Codec, target: Codec) -> Self {
        Conversion { source, target }
    }

    /// Recode `fields` in place. Missing fields are read as `""` and written
    /// back as `""`.
    pub fn apply(&self, metadata: &mut Metadata, fields: &[&str]) {
        for &field in fields {
            let recoded = recode(metadata.get(field), self.source, self.target);
            metadata.set(field, recoded);
        }
    }
}

pub fn convert_file(conversion: &Conversion, file: &mut File) {
    log::debug!(
        "converting {} from {} to {}",
        file.path.display(),
        conversion.source,
        conversion.target
    );
    conversion.apply(&mut file.metadata, &FILE_FIELDS);
    file.update();
}

/// Member files first, then the cluster's own artist/album.
pub fn convert_cluster(conversion: &Conversion, cluster: &mut Cluster) {
    for file in &mut cluster.files {
        convert_file(conversion, file);
    }
    conversion.apply(&mut cluster.metadata, &CLUSTER_FIELDS);
    cluster.update();
}

pub fn reset_file(file: &mut File) {
    log::debug!("resetting {}", file.path.display());
    for field in FILE_FIELDS {
        let orig = file.orig_metadata().get(field).to_string();
        file.metadata.set(field, orig);
    }
    file.update();
}

/// Resets member files only. Clusters keep no original snapshot, so their own
/// artist/album stay as they are and no cluster refresh is sent.
pub fn reset_cluster(cluster: &mut Cluster) {
    for file in &mut cluster.files {
        reset_file(file);
    }
}
