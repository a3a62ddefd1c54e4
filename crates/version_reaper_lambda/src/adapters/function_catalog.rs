use version_reaper_core::pagination::Paginated;
use version_reaper_core::records::{AliasRecord, FunctionRecord, Page, VersionRecord};

/// The four Lambda control-plane operations the reaper consumes.
///
/// Listing operations return one page per call; `marker` is `None` for the
/// first page and the previous page's `next_marker` afterwards.
pub trait FunctionCatalog {
    fn list_functions_page(&self, marker: Option<&str>) -> Result<Page<FunctionRecord>, String>;

    fn list_aliases_page(
        &self,
        function_arn: &str,
        marker: Option<&str>,
    ) -> Result<Page<AliasRecord>, String>;

    fn list_versions_page(
        &self,
        function_arn: &str,
        marker: Option<&str>,
    ) -> Result<Page<VersionRecord>, String>;

    fn delete_version(&self, version_arn: &str) -> Result<(), String>;
}

pub fn all_functions<'a, C>(
    catalog: &'a C,
) -> impl Iterator<Item = Result<FunctionRecord, String>> + 'a
where
    C: FunctionCatalog + ?Sized,
{
    Paginated::new(move |marker: Option<&str>| catalog.list_functions_page(marker))
}

pub fn all_aliases<'a, C>(
    catalog: &'a C,
    function_arn: &'a str,
) -> impl Iterator<Item = Result<AliasRecord, String>> + 'a
where
    C: FunctionCatalog + ?Sized,
{
    Paginated::new(move |marker: Option<&str>| catalog.list_aliases_page(function_arn, marker))
}

pub fn all_versions<'a, C>(
    catalog: &'a C,
    function_arn: &'a str,
) -> impl Iterator<Item = Result<VersionRecord, String>> + 'a
where
    C: FunctionCatalog + ?Sized,
{
    Paginated::new(move |marker: Option<&str>| catalog.list_versions_page(function_arn, marker))
}
