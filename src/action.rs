//! Menu actions and how they pick their entities out of a selection.

use std::fmt;

use crate::convert::{Conversion, convert_cluster, convert_file, reset_cluster, reset_file};
use crate::metadata::{Cluster, File};

/// Something the user has selected in the host.
#[derive(Debug, Clone)]
pub enum Item {
    File(File),
    Cluster(Cluster),
    /// Any other entity (album, track, ...). Ignored by every action.
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Convert,
    Reset,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Convert => "Convert Encoding...",
            Self::Reset => "Reset Encoding...",
        }
    }
}

/// A registered menu action. Each one only acts on its own entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    File(Operation),
    Cluster(Operation),
}

impl Action {
    pub fn name(&self) -> &'static str {
        self.operation().name()
    }

    pub fn operation(&self) -> Operation {
        match *self {
            Self::File(op) | Self::Cluster(op) => op,
        }
    }

    /// Whether the action needs a source/target pair from the user.
    pub fn needs_conversion(&self) -> bool {
        self.operation() == Operation::Convert
    }

    /// Run the action over `selection`. `ask` is consulted once, before any
    /// entity is touched, and only for convert actions; `None` cancels.
    /// Returns how many entities were processed.
    pub fn callback<F>(&self, selection: &mut [Item], ask: F) -> usize
    where
        F: FnOnce() -> Option<Conversion>,
    {
        let conversion = if self.needs_conversion() {
            match ask() {
                Some(c) => Some(c),
                None => return 0,
            }
        } else {
            None
        };

        let mut processed = 0;
        for item in selection.iter_mut() {
            match (self, item, conversion.as_ref()) {
                (Self::File(Operation::Convert), Item::File(f), Some(c)) => convert_file(c, f),
                (Self::File(Operation::Reset), Item::File(f), _) => reset_file(f),
                (Self::Cluster(Operation::Convert), Item::Cluster(cl), Some(c)) => {
                    convert_cluster(c, cl)
                }
                (Self::Cluster(Operation::Reset), Item::Cluster(cl), _) => reset_cluster(cl),
                _ => continue,
            }
            processed += 1;
        }
        processed
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Host side of action registration.
pub trait ActionRegistry {
    fn register_file_action(&mut self, action: Action);
    fn register_cluster_action(&mut self, action: Action);
}

/// Register every action with the host.
pub fn register<R: ActionRegistry>(registry: &mut R) {
    registry.register_file_action(Action::File(Operation::Convert));
    registry.register_cluster_action(Action::Cluster(Operation::Convert));
    registry.register_file_action(Action::File(Operation::Reset));
    registry.register_cluster_action(Action::Cluster(Operation::Reset));
}

/// Plain in-memory registry, in registration order.
#[derive(Debug, Default)]
pub struct Menu {
    pub file_actions: Vec<Action>,
    pub cluster_actions: Vec<Action>,
}

impl ActionRegistry for Menu {
    fn register_file_action(&mut self, action: Action) {
        self.file_actions.push(action);
    }

    fn register_cluster_action(&mut self, action: Action) {
        self.cluster_actions.push(action);
    }
}

impl Menu {
    pub fn find(&self, name: &str, cluster: bool) -> Option<Action> {
        let actions = if cluster {
            &self.cluster_actions
        } else {
            &self.file_actions
        };
        actions.iter().copied().find(|a| a.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{Codec, lookup};
    use crate::metadata::Metadata;

    fn file(title: &str) -> File {
        File::new("t.mp3", Metadata::from_iter([("title", title)]))
    }

    fn conversion() -> Conversion {
        Conversion::new(lookup("utf-8").unwrap(), Codec::LATIN_1)
    }

    #[test]
    fn test_register_order() {
        let mut menu = Menu::default();
        register(&mut menu);
        assert_eq!(
            menu.file_actions,
            [Action::File(Operation::Convert), Action::File(Operation::Reset)]
        );
        assert_eq!(menu.cluster_actions[0].name(), "Convert Encoding...");
        assert_eq!(menu.cluster_actions[1].name(), "Reset Encoding...");
        assert_eq!(
            menu.find("Reset Encoding...", true),
            Some(Action::Cluster(Operation::Reset))
        );
    }

    #[test]
    fn test_file_action_ignores_clusters() {
        let mut selection = vec![
            Item::File(file("é")),
            Item::Cluster(Cluster::new("é", "é")),
            Item::Other("album".to_string()),
        ];
        let n = Action::File(Operation::Convert).callback(&mut selection, || Some(conversion()));
        assert_eq!(n, 1);

        let Item::File(f) = &selection[0] else { panic!() };
        assert_eq!(f.metadata.get("title"), "\u{c3}\u{a9}");
        let Item::Cluster(c) = &selection[1] else { panic!() };
        assert_eq!(c.metadata.get("album"), "é");
        assert_eq!(c.update_count(), 0);
    }

    #[test]
    fn test_cluster_action_ignores_files() {
        let mut selection = vec![Item::File(file("é")), Item::Cluster(Cluster::new("é", "é"))];
        let n = Action::Cluster(Operation::Convert).callback(&mut selection, || Some(conversion()));
        assert_eq!(n, 1);

        let Item::File(f) = &selection[0] else { panic!() };
        assert_eq!(f.metadata.get("title"), "é");
        let Item::Cluster(c) = &selection[1] else { panic!() };
        assert_eq!(c.metadata.get("album"), "\u{c3}\u{a9}");
    }

    #[test]
    fn test_cancel_leaves_selection_untouched() {
        let mut selection = vec![Item::File(file("é"))];
        let n = Action::File(Operation::Convert).callback(&mut selection, || None);
        assert_eq!(n, 0);
        let Item::File(f) = &selection[0] else { panic!() };
        assert_eq!(f.update_count(), 0);
    }

    #[test]
    fn test_reset_never_asks() {
        let mut selection = vec![Item::File(file("é"))];
        let n = Action::File(Operation::Reset).callback(&mut selection, || {
            panic!("reset must not prompt")
        });
        assert_eq!(n, 1);
    }
}
