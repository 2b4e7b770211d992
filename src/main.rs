//! CLI клиент Acon
//!
//! Работает со слоем данных напрямую: показывает профиль, управляет
//! подтверждёнными районами и следит за их изменениями.

use std::path::PathBuf;

use acon::{
    init_logging,
    usecase::ValidateBirthDate,
    AconResult, DataCore, Settings, StackError,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use futures::StreamExt;
use serde::Serialize;
use tracing::debug;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT"),
    ", built ",
    env!("BUILD_TIME"),
    ")"
);

/// Основная структура CLI аргументов
#[derive(Parser)]
#[command(name = "acon")]
#[command(version = VERSION)]
#[command(about = "Acon data core command line client", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Путь к TOML-файлу настроек
    #[arg(short, long, env = "ACON_CONFIG", help = "Path to a TOML settings file")]
    config: Option<PathBuf>,
    /// Подробный вывод (debug)
    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
    /// Только предупреждения и ошибки
    #[arg(short = 'q', long, conflicts_with = "verbose", help = "Only log warnings and errors")]
    quiet: bool,
    /// Формат вывода результатов
    #[arg(long, value_enum, default_value = "pretty", help = "Output format")]
    output: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

/// Формат вывода CLI
#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Человекочитаемый формат
    Pretty,
    /// JSON формат
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Подтверждённые районы
    #[command(subcommand)]
    Areas(AreaCommand),
    /// Профиль пользователя
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Проверка даты рождения
    #[command(name = "birth-date", subcommand)]
    BirthDate(BirthDateCommand),
    /// Сведения о приложении
    #[command(subcommand)]
    App(AppCommand),
}

#[derive(Subcommand)]
enum AppCommand {
    /// Проверить, требуется ли обновление для версии
    #[command(name = "check-update")]
    CheckUpdate { version: String },
}

#[derive(Subcommand)]
enum AreaCommand {
    /// Показать список районов
    List,
    /// Печатать список при каждом изменении (до Ctrl-C)
    Watch,
    /// Подтвердить район по координатам
    Verify {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
    /// Удалить район
    Delete { verified_area_id: i64 },
    /// Заменить район новым по координатам
    Replace {
        previous_verified_area_id: i64,
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Показать профиль
    Show,
    /// Показать сохранённые места
    Spots,
    /// Проверить никнейм (локально и на сервере)
    Nickname { nickname: String },
}

#[derive(Subcommand)]
enum BirthDateCommand {
    /// Проверить дату вида yyyy.MM.dd или yyyyMMdd
    Check { date: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    if cli.verbose {
        settings.logging.level = "debug".to_string();
    } else if cli.quiet {
        settings.logging.level = "warn".to_string();
    }
    let logging = init_logging(&settings.logging)?;

    let result = run(&cli, &settings).await;
    logging.shutdown();

    if let Err(err) = result {
        report(cli.output, &err);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(
    cli: &Cli,
    settings: &Settings,
) -> AconResult<()> {
    // Проверка даты не требует сети.
    if let Commands::BirthDate(BirthDateCommand::Check { date }) = &cli.command {
        return check_birth_date(cli.output, date);
    }

    let core = DataCore::new(settings).await?;
    debug!(status = ?core.session.current_status(), "Session restored");

    match &cli.command {
        Commands::Areas(cmd) => run_areas(cli.output, &core, cmd).await,
        Commands::Profile(cmd) => run_profile(cli.output, &core, cmd).await,
        Commands::App(AppCommand::CheckUpdate { version }) => {
            let should_update = core.app.should_update_app(version).await?;
            print_value(cli.output, &should_update);
            Ok(())
        }
        Commands::BirthDate(_) => Ok(()),
    }
}

async fn run_areas(
    output: OutputFormat,
    core: &DataCore,
    cmd: &AreaCommand,
) -> AconResult<()> {
    match cmd {
        AreaCommand::List => {
            let mut areas = core.profile.get_verified_areas();
            if let Some(result) = areas.next().await {
                print_areas(output, &result?);
            }
        }
        AreaCommand::Watch => {
            let mut areas = core.profile.get_verified_areas();
            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => break,
                    next = areas.next() => match next {
                        Some(Ok(list)) => print_areas(output, &list),
                        Some(Err(err)) => report(output, &err),
                        None => break,
                    },
                }
            }
        }
        AreaCommand::Verify {
            latitude,
            longitude,
        } => {
            core.onboarding.verify_area(*latitude, *longitude).await?;
            println!("verified");
        }
        AreaCommand::Delete { verified_area_id } => {
            core.profile.delete_verified_area(*verified_area_id).await?;
            println!("deleted {verified_area_id}");
        }
        AreaCommand::Replace {
            previous_verified_area_id,
            latitude,
            longitude,
        } => {
            core.profile
                .replace_verified_area(*previous_verified_area_id, *latitude, *longitude)
                .await?;
            println!("replaced {previous_verified_area_id}");
        }
    }
    Ok(())
}

async fn run_profile(
    output: OutputFormat,
    core: &DataCore,
    cmd: &ProfileCommand,
) -> AconResult<()> {
    match cmd {
        ProfileCommand::Show => {
            if let Some(profile) = core.profile.get_profile().next().await {
                print_value(output, &profile?);
            }
        }
        ProfileCommand::Spots => {
            if let Some(spots) = core.profile.get_saved_spots().next().await {
                print_value(output, &spots?);
            }
        }
        ProfileCommand::Nickname { nickname } => {
            core.profile.validate_nickname(nickname).await?;
            println!("available");
        }
    }
    Ok(())
}

fn check_birth_date(
    output: OutputFormat,
    input: &str,
) -> AconResult<()> {
    let compact: String = input.chars().filter(|c| *c != '.').collect();
    let date = ValidateBirthDate::new()
        .call_input(&compact)
        .map_err(StackError::new)?;
    print_value(output, &date);
    Ok(())
}

fn print_areas(
    output: OutputFormat,
    areas: &[acon::VerifiedArea],
) {
    match output {
        OutputFormat::Json => print_value(output, &areas),
        OutputFormat::Pretty if areas.is_empty() => println!("(no verified areas)"),
        OutputFormat::Pretty => {
            for area in areas {
                println!("{:>6}  {}", area.verified_area_id, area.name);
            }
        }
    }
}

fn print_value<T: Serialize + std::fmt::Debug>(
    output: OutputFormat,
    value: &T,
) {
    match output {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("failed to encode output: {e}"),
        },
        OutputFormat::Pretty => println!("{value:#?}"),
    }
}

fn report(
    output: OutputFormat,
    err: &StackError,
) {
    match output {
        OutputFormat::Json => match serde_json::to_string(&err.to_report()) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("error: {}", err.client_message()),
        },
        OutputFormat::Pretty => eprintln!("error: {} ({err})", err.client_message()),
    }
}
