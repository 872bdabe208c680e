use std::sync::Arc;

use clap::Parser;
use stratplan::adapters::http;
use stratplan::config::cli::{load_validated_questionnaire, write_output};
use stratplan::config::{Command, OutputFormat};
use stratplan::core::prompt::build_business_plan_prompt;
use stratplan::core::render::render_markdown;
use stratplan::core::schema::business_plan_schema;
use stratplan::core::ConfigProvider;
use stratplan::utils::error::ErrorCategory;
use stratplan::utils::{logger, validation::Validate};
use stratplan::{AnthropicClient, AppConfig, CliConfig, GenerationSettings, PlanError, PlanGenerator};

fn load_config(cli: &CliConfig) -> Result<AppConfig, PlanError> {
    match &cli.config {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::from_env(),
    }
}

fn exit_code(err: &PlanError) -> i32 {
    match err.category() {
        ErrorCategory::InvalidRequest => 2,
        ErrorCategory::Generation => 1,
        ErrorCategory::Configuration => 3,
    }
}

fn fail(err: PlanError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", err, err.category());
    tracing::error!("💡 Recovery suggestion: {}", err.recovery_suggestion());
    eprintln!("❌ {}: {}", err.user_friendly_message(), err.details());
    eprintln!("💡 {}", err.recovery_suggestion());
    std::process::exit(exit_code(&err));
}

fn emit(output: Option<&std::path::Path>, text: &str) -> Result<(), PlanError> {
    match output {
        Some(path) => {
            write_output(path, text)?;
            eprintln!("📁 Output saved to: {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if let Command::Schema = cli.command {
        println!("{}", serde_json::to_string_pretty(&business_plan_schema())?);
        return Ok(());
    }

    let loaded = load_config(&cli);
    let (log_format, log_level) = match &loaded {
        Ok(config) => (config.log_format().to_string(), config.log_level().map(str::to_string)),
        Err(_) => ("compact".to_string(), None),
    };
    if log_format == "json" {
        logger::init_json_logger(cli.verbose, log_level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, log_level.as_deref());
    }

    tracing::info!("Starting stratplan");

    // Input errors take priority over configuration errors.
    let questionnaire = match &cli.command {
        Command::Generate { input, .. } => {
            let require_all_fields = loaded
                .as_ref()
                .map(|config| config.require_all_fields())
                .unwrap_or(false);
            let responses = load_validated_questionnaire(input, require_all_fields)
                .unwrap_or_else(|e| fail(e));
            Some(responses)
        }
        _ => None,
    };

    if let (
        Command::Generate {
            dry_run: true,
            output,
            ..
        },
        Some(responses),
    ) = (&cli.command, &questionnaire)
    {
        let prompt = build_business_plan_prompt(responses);
        tracing::info!("🔍 DRY RUN MODE - no model call will be made");
        emit(output.as_deref(), &prompt).unwrap_or_else(|e| fail(e));
        return Ok(());
    }

    let mut config = loaded.unwrap_or_else(|e| fail(e));
    if let Command::Serve { bind, port } = &cli.command {
        if let Some(bind) = bind {
            config.set_bind(bind.clone());
        }
        if let Some(port) = port {
            config.set_port(*port);
        }
    }

    if let Err(e) = config.validate() {
        fail(e);
    }
    if cli.verbose {
        tracing::debug!(
            "Model: {}, max tokens: {}, require all fields: {}",
            config.model(),
            config.max_tokens(),
            config.require_all_fields()
        );
    }

    let client = AnthropicClient::from_config(&config).unwrap_or_else(|e| fail(e));
    let generator = PlanGenerator::new(client, GenerationSettings::from_config(&config));

    match (cli.command, questionnaire) {
        (Command::Serve { .. }, _) => {
            let addr = config.socket_addr().unwrap_or_else(|e| fail(e));
            if let Err(e) = http::run_server(Arc::new(generator), addr).await {
                fail(e);
            }
        }
        (Command::Generate { format, output, .. }, Some(responses)) => {
            let plan = generator.generate(&responses).await.unwrap_or_else(|e| fail(e));

            let text = match format {
                OutputFormat::Markdown => render_markdown(&responses, &plan, chrono::Utc::now()),
                OutputFormat::Json => serde_json::to_string_pretty(&plan)?,
            };
            emit(output.as_deref(), &text).unwrap_or_else(|e| fail(e));
            tracing::info!("✅ Business plan generated");
        }
        _ => {}
    }

    Ok(())
}
