use std::collections::BTreeSet;

use crate::records::{AliasRecord, FunctionRecord, VersionRecord};

/// Versions of `function` that must survive a reap: the current version plus
/// every alias target.
pub fn protected_versions(function: &FunctionRecord, aliases: &[AliasRecord]) -> BTreeSet<String> {
    let mut protected: BTreeSet<String> = aliases
        .iter()
        .map(|alias| alias.function_version.clone())
        .collect();
    protected.insert(function.current_version.clone());
    protected
}

pub fn is_reapable(version: &VersionRecord, protected: &BTreeSet<String>) -> bool {
    !protected.contains(&version.version)
}

#[cfg(test)]
mod tests {
    use crate::records::LATEST_VERSION;

    use super::*;

    const BASE_ARN: &str = "arn:aws:lambda:eu-west-1:123456789012:function";

    fn function(name: &str, current_version: &str) -> FunctionRecord {
        FunctionRecord::new(name, format!("{BASE_ARN}:{name}"), current_version)
    }

    fn versions(function: &FunctionRecord, ids: &[&str]) -> Vec<VersionRecord> {
        ids.iter()
            .map(|id| VersionRecord::new(*id, format!("{}:{id}", function.arn)))
            .collect()
    }

    fn plan_deletions(
        function: &FunctionRecord,
        aliases: &[AliasRecord],
        versions: &[VersionRecord],
    ) -> Vec<VersionRecord> {
        let protected = protected_versions(function, aliases);
        versions
            .iter()
            .filter(|version| is_reapable(version, &protected))
            .cloned()
            .collect()
    }

    fn deleted_ids(planned: &[VersionRecord]) -> Vec<&str> {
        planned.iter().map(|version| version.version.as_str()).collect()
    }

    #[test]
    fn aliased_and_current_versions_survive() {
        let f1 = function("f1", "3");
        let planned = plan_deletions(
            &f1,
            &[AliasRecord::new("prod", "2")],
            &versions(&f1, &["1", "2", "3"]),
        );

        assert_eq!(deleted_ids(&planned), vec!["1"]);
        assert_eq!(planned[0].arn, format!("{BASE_ARN}:f1:1"));
    }

    #[test]
    fn everything_but_current_goes_without_aliases() {
        let f2 = function("f2", "5");
        let planned = plan_deletions(&f2, &[], &versions(&f2, &["1", "2", "3", "4", "5"]));

        assert_eq!(deleted_ids(&planned), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn fully_aliased_function_keeps_everything() {
        let f3 = function("f3", "2");
        let planned = plan_deletions(
            &f3,
            &[AliasRecord::new("stable", "1"), AliasRecord::new("canary", "2")],
            &versions(&f3, &["1", "2"]),
        );

        assert!(planned.is_empty());
    }

    #[test]
    fn latest_is_protected_for_unqualified_listings() {
        let f4 = function("f4", LATEST_VERSION);
        let planned = plan_deletions(
            &f4,
            &[AliasRecord::new("live", "2")],
            &versions(&f4, &[LATEST_VERSION, "1", "2", "3"]),
        );

        assert_eq!(deleted_ids(&planned), vec!["1", "3"]);
    }

    #[test]
    fn current_version_is_protected_regardless_of_aliases() {
        let f5 = function("f5", "4");
        let protected = protected_versions(&f5, &[AliasRecord::new("old", "1")]);

        assert!(protected.contains("4"));
        assert!(protected.contains("1"));
        assert!(!is_reapable(&VersionRecord::new("4", format!("{}:4", f5.arn)), &protected));
        assert!(is_reapable(&VersionRecord::new("2", format!("{}:2", f5.arn)), &protected));
    }

    #[test]
    fn version_targeted_by_several_aliases_is_protected_once() {
        let f6 = function("f6", "9");
        let protected = protected_versions(
            &f6,
            &[AliasRecord::new("blue", "7"), AliasRecord::new("green", "7")],
        );

        assert_eq!(
            protected.into_iter().collect::<Vec<_>>(),
            vec!["7".to_string(), "9".to_string()]
        );
    }
}
