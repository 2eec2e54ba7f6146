//! Identity map from visited source structures to the targets built for them.

use std::collections::HashMap;

use crate::structure::Structure;

/// Source-to-target map scoped to one merge invocation.
///
/// Entries keep the source handle alive so its address cannot be reused by
/// another allocation while the invocation runs.
#[derive(Default)]
pub(super) struct CircularRefs {
    targets: HashMap<usize, (Structure, Structure)>,
}

impl CircularRefs {
    /// Record that `target` is being built from `source`. A later
    /// registration of the same source replaces the earlier one.
    pub(super) fn register(&mut self, source: &Structure, target: &Structure) {
        self.targets
            .insert(source.identity(), (source.clone(), target.clone()));
    }

    /// The target built for `source`, if it has been visited.
    pub(super) fn resolve(&self, source: &Structure) -> Option<Structure> {
        self.targets
            .get(&source.identity())
            .map(|(_, target)| target.clone())
    }
}
