use std::future::Future;

use aws_sdk_lambda::error::DisplayErrorContext;
use aws_sdk_lambda::types::{AliasConfiguration, FunctionConfiguration};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use version_reaper_core::records::{AliasRecord, FunctionRecord, Page, VersionRecord};
use version_reaper_lambda::adapters::function_catalog::FunctionCatalog;
use version_reaper_lambda::config::ReaperConfig;
use version_reaper_lambda::handlers::reaper::reap;

struct AwsLambdaCatalog {
    lambda_client: aws_sdk_lambda::Client,
}

impl FunctionCatalog for AwsLambdaCatalog {
    fn list_functions_page(&self, marker: Option<&str>) -> Result<Page<FunctionRecord>, String> {
        let client = self.lambda_client.clone();
        let marker = marker.map(str::to_string);

        let output = block_on(async move { client.list_functions().set_marker(marker).send().await })
            .map_err(|error| format!("failed to list functions: {}", DisplayErrorContext(&error)))?;

        Ok(Page {
            items: output
                .functions()
                .iter()
                .map(function_record)
                .collect::<Result<_, _>>()?,
            next_marker: output.next_marker().map(str::to_string),
        })
    }

    fn list_aliases_page(
        &self,
        function_arn: &str,
        marker: Option<&str>,
    ) -> Result<Page<AliasRecord>, String> {
        let client = self.lambda_client.clone();
        let function_name = function_arn.to_string();
        let marker = marker.map(str::to_string);

        let output = block_on(async move {
            client
                .list_aliases()
                .function_name(function_name)
                .set_marker(marker)
                .send()
                .await
        })
        .map_err(|error| {
            format!(
                "failed to list aliases for {function_arn}: {}",
                DisplayErrorContext(&error)
            )
        })?;

        Ok(Page {
            items: output
                .aliases()
                .iter()
                .map(|alias| alias_record(function_arn, alias))
                .collect::<Result<_, _>>()?,
            next_marker: output.next_marker().map(str::to_string),
        })
    }

    fn list_versions_page(
        &self,
        function_arn: &str,
        marker: Option<&str>,
    ) -> Result<Page<VersionRecord>, String> {
        let client = self.lambda_client.clone();
        let function_name = function_arn.to_string();
        let marker = marker.map(str::to_string);

        let output = block_on(async move {
            client
                .list_versions_by_function()
                .function_name(function_name)
                .set_marker(marker)
                .send()
                .await
        })
        .map_err(|error| {
            format!(
                "failed to list versions for {function_arn}: {}",
                DisplayErrorContext(&error)
            )
        })?;

        Ok(Page {
            items: output
                .versions()
                .iter()
                .map(version_record)
                .collect::<Result<_, _>>()?,
            next_marker: output.next_marker().map(str::to_string),
        })
    }

    fn delete_version(&self, version_arn: &str) -> Result<(), String> {
        let client = self.lambda_client.clone();
        let function_name = version_arn.to_string();

        block_on(async move {
            client
                .delete_function()
                .function_name(function_name)
                .send()
                .await
        })
        .map(|_| ())
        .map_err(|error| {
            format!(
                "failed to delete {version_arn}: {}",
                DisplayErrorContext(&error)
            )
        })
    }
}

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

fn required<'a>(value: Option<&'a str>, field: &str, context: &str) -> Result<&'a str, String> {
    value
        .filter(|text| !text.is_empty())
        .ok_or_else(|| format!("{context} is missing {field}"))
}

fn function_record(function: &FunctionConfiguration) -> Result<FunctionRecord, String> {
    let arn = required(function.function_arn(), "FunctionArn", "listed function")?;
    let name = function.function_name().unwrap_or(arn);
    let current_version = required(function.version(), "Version", arn)?;
    Ok(FunctionRecord::new(name, arn, current_version))
}

fn alias_record(function_arn: &str, alias: &AliasConfiguration) -> Result<AliasRecord, String> {
    let name = alias.name().unwrap_or_default();
    let context = format!("alias `{name}` of {function_arn}");
    let function_version = required(alias.function_version(), "FunctionVersion", &context)?;
    Ok(AliasRecord::new(name, function_version))
}

fn version_record(version: &FunctionConfiguration) -> Result<VersionRecord, String> {
    let arn = required(version.function_arn(), "FunctionArn", "listed version")?;
    let identifier = required(version.version(), "Version", arn)?;
    Ok(VersionRecord::new(identifier, arn))
}

async fn handle_request(_event: LambdaEvent<Value>) -> Result<Value, Error> {
    let config = ReaperConfig::from_env().map_err(|error| Error::from(error.to_string()))?;

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .load()
        .await;
    let catalog = AwsLambdaCatalog {
        lambda_client: aws_sdk_lambda::Client::new(&aws_config),
    };

    let summary =
        reap(&catalog, &config.reap_options()).map_err(|error| Error::from(error.to_string()))?;
    serde_json::to_value(summary)
        .map_err(|error| Error::from(format!("failed to serialize reap summary: {error}")))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
