use clap::{Parser, Subcommand, ValueEnum};
use component_form::visibility as component_visibility;
use form_spec::{Form, ValidationResult, default_values, validate_form};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const LOG_ENV: &str = "FORMBUILDER_LOG";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Form definition and visibility inspector",
    long_about = "Evaluates conditional visibility, checks form definitions, and prints schemas for form builder JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Show which fields are visible for a set of values.
    Visibility {
        /// Path to the form JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// Optional JSON file with the current field values.
        #[arg(long, value_name = "VALUES")]
        values: Option<PathBuf>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Check a form definition (names, labels, ids, rule references).
    Check {
        /// Path to the form JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
    },
    /// Print the initial values for every field.
    Defaults {
        /// Path to the form JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
    },
    /// Print the JSON Schema of the form document.
    Schema,
}

fn main() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Visibility {
            form,
            values,
            format,
        } => run_visibility(form, values, format),
        Command::Check { form } => run_check(form),
        Command::Defaults { form } => run_defaults(form),
        Command::Schema => run_schema(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_form(path: &Path) -> CliResult<(Form, String)> {
    let form_json = fs::read_to_string(path)?;
    let form: Form = serde_json::from_str(&form_json)?;
    info!(form = %form.id, elements = form.elements.len(), "loaded form");
    Ok((form, form_json))
}

/// Values files must hold a JSON object keyed by field id.
fn read_values(path: &Path) -> CliResult<String> {
    let raw = fs::read_to_string(path)?;
    let values: Value = serde_json::from_str(&raw)
        .map_err(|err| format!("invalid values file {}: {err}", path.display()))?;
    if !values.is_object() {
        return Err(format!("values file {} must hold a JSON object", path.display()).into());
    }
    Ok(values.to_string())
}

fn run_visibility(
    form_path: PathBuf,
    values_path: Option<PathBuf>,
    format: OutputFormat,
) -> CliResult<()> {
    let (form, form_json) = read_form(&form_path)?;
    let values_json = match values_path {
        Some(path) => read_values(&path)?,
        None => "{}".to_string(),
    };
    let config = json!({ "form_json": form_json }).to_string();

    let response = component_visibility(&form.id, &config, &values_json);
    let result = parse_component_result(&response)?;
    debug!(response = %response, "visibility response");

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print!("{}", describe_visibility(&form, &result)),
    }
    Ok(())
}

fn run_check(form_path: PathBuf) -> CliResult<()> {
    let (form, _) = read_form(&form_path)?;
    let result = validate_form(&form);
    println!(
        "Form check: {}",
        if result.valid { "valid" } else { "invalid" }
    );
    describe_check(&result);

    if result.valid {
        Ok(())
    } else {
        Err("form check failed".into())
    }
}

fn run_defaults(form_path: PathBuf) -> CliResult<()> {
    let (form, _) = read_form(&form_path)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&default_values(&form))?
    );
    Ok(())
}

fn run_schema() -> CliResult<()> {
    let schema = schemars::schema_for!(Form);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn parse_component_result(response: &str) -> CliResult<Value> {
    let value: Value = serde_json::from_str(response)?;
    if let Some(error) = value.get("error").and_then(Value::as_str) {
        return Err(error.to_string().into());
    }
    Ok(value)
}

fn describe_visibility(form: &Form, result: &Value) -> String {
    let visibility = result.get("visibility").and_then(Value::as_object);
    let is_visible = |id: &str| {
        visibility
            .and_then(|map| map.get(id))
            .and_then(Value::as_bool)
            .unwrap_or(true)
    };
    let (visible, hidden): (Vec<_>, Vec<_>) = form
        .elements
        .iter()
        .partition(|element| is_visible(&element.id));

    let mut out = format!("Form: {} ({})\n", form.name, form.id);
    out.push_str(&format!(
        "Visible fields ({}/{}):\n",
        visible.len(),
        form.elements.len()
    ));
    for element in &visible {
        out.push_str(&format!("  {}  {}\n", element.id, element.display_name()));
    }
    if !hidden.is_empty() {
        out.push_str("Hidden fields:\n");
        for element in &hidden {
            out.push_str(&format!("  {}  {}\n", element.id, element.display_name()));
        }
    }
    out
}

fn describe_check(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("Errors:");
        for error in &result.errors {
            println!("  {} - {} [{}]", error.path, error.message, error.code);
        }
    }
    if !result.warnings.is_empty() {
        println!("Warnings:");
        for warning in &result.warnings {
            println!("  {} - {} [{}]", warning.path, warning.message, warning.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_spec::{ConditionalLogic, ConditionalRule, Field};

    fn sample_form() -> Form {
        Form::new(
            "sample",
            "Sample",
            vec![
                Field::checkbox("cb", "Toggle"),
                Field::text("more", "More")
                    .required(true)
                    .with_logic(ConditionalLogic::all([ConditionalRule::new("cb", true)])),
            ],
        )
    }

    #[test]
    fn parse_component_result_surfaces_errors() {
        let err = parse_component_result(r#"{"error":"form 'x' is not available"}"#)
            .expect_err("error response");
        assert_eq!(err.to_string(), "form 'x' is not available");
        assert!(parse_component_result(r#"{"visible":[]}"#).is_ok());
    }

    #[test]
    fn describe_visibility_splits_fields() {
        let result = json!({ "visibility": { "cb": true, "more": false } });
        let text = describe_visibility(&sample_form(), &result);
        assert!(text.contains("Form: Sample (sample)"));
        assert!(text.contains("Visible fields (1/2):"));
        assert!(text.contains("  cb  Toggle - Checkbox"));
        assert!(text.contains("Hidden fields:\n  more  More - Text Field (Required)"));
    }

    #[test]
    fn describe_visibility_omits_empty_hidden_section() {
        let result = json!({ "visibility": { "cb": true, "more": true } });
        let text = describe_visibility(&sample_form(), &result);
        assert!(text.contains("Visible fields (2/2):"));
        assert!(!text.contains("Hidden fields"));
    }
}
