//! Action record names

use crate::report::Reporter;

/// Hands out record names for actions during one export run.
///
/// Actions are named `<Object>Action.<Name>`; the record name is `<Name>`.
/// Actions without a suffix get `unnamed0`, `unnamed1`, ... in the order
/// they are met.
#[derive(Debug, Default)]
pub struct ActionNamer {
    unnamed: usize,
}

impl ActionNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fallback names handed out so far
    pub fn unnamed_count(&self) -> usize {
        self.unnamed
    }

    pub fn record_name(&mut self, full_name: &str, reporter: &mut dyn Reporter) -> String {
        match full_name.rsplit_once('.') {
            Some((_, suffix)) if !suffix.is_empty() => suffix.to_string(),
            _ => {
                let name = format!("unnamed{}", self.unnamed);
                self.unnamed += 1;
                reporter.warn(&format!(
                    "action '{}' has no '.<name>' suffix, exporting it as '{}'",
                    full_name, name
                ));
                name
            }
        }
    }
}

/// Part of an action name before its last `.`
pub fn base_name(full_name: &str) -> &str {
    full_name
        .rsplit_once('.')
        .map_or(full_name, |(base, _)| base)
}
