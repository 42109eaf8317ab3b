mod config;
mod error;
mod logging;
mod print;

#[cfg(feature = "tui")]
mod tui;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rota_api::RotaClient;
use rota_core::{DutyForm, FormField, SubmitOutcome, WeekView};

use crate::config::resolve_client_config;
use crate::error::RotaToolError;

#[derive(Parser)]
#[command(name = "rota")]
#[command(about = "Vehicle duty scheduling client", long_about = None)]
struct Cli {
    /// Base URL of the duty API
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[cfg(feature = "tui")]
    /// Open the interactive duty form and weekly viewer
    Tui {
        /// Initially selected date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Print the duties of the week containing a date
    Week {
        /// Date inside the week (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// List vehicles
    Vehicles,

    /// List drivers and conductors
    Crew,

    /// Create a duty
    Add {
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        start_time: Option<String>,
        /// Vehicle id
        #[arg(long)]
        vehicle: Option<String>,
        /// Duration in hours
        #[arg(long)]
        duration: Option<String>,
        /// Driver id
        #[arg(long)]
        driver: Option<String>,
        /// Conductor id
        #[arg(long)]
        conductor: Option<String>,
    },
}

fn parse_date(raw: Option<String>) -> Result<NaiveDate, RotaToolError> {
    match raw {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| RotaToolError::InvalidDate(s)),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_init = match &cli.command {
        #[cfg(feature = "tui")]
        Command::Tui { .. } => logging::init_file(&config::log_file_path()),
        _ => logging::init_stderr(),
    };
    log_init?;

    let client = RotaClient::new(resolve_client_config(cli.base_url, cli.timeout))?;

    match cli.command {
        #[cfg(feature = "tui")]
        Command::Tui { date } => {
            let date = parse_date(date)?;
            tui::run(client, date).await?;
        }
        Command::Week { date } => {
            let mut view = WeekView::new(parse_date(date)?);
            let request = view.refresh();
            let buckets = client.fetch_week(&request.range).await?;
            view.apply::<RotaToolError>(request.token, Ok(buckets));
            print!("{}", print::render_week(&view));
        }
        Command::Vehicles => {
            let vehicles = client.fetch_vehicles().await?;
            let data = rota_core::ReferenceData {
                vehicles,
                ..Default::default()
            };
            print!("{}", print::render_vehicles(&data));
        }
        Command::Crew => {
            let crew = client.fetch_crew().await?;
            let data = rota_core::ReferenceData {
                drivers: crew.drivers,
                conductors: crew.conductors,
                ..Default::default()
            };
            print!("{}", print::render_crew(&data));
        }
        Command::Add {
            date,
            start_time,
            vehicle,
            duration,
            driver,
            conductor,
        } => {
            let mut form = DutyForm::new();
            let values = [
                (FormField::Date, date),
                (FormField::StartTime, start_time),
                (FormField::Vehicle, vehicle),
                (FormField::Duration, duration),
                (FormField::Driver, driver),
                (FormField::Conductor, conductor),
            ];
            for (field, value) in values {
                form.set(field, value.unwrap_or_default());
            }

            add_duty(&client, &mut form).await?;
        }
    }

    Ok(())
}

async fn add_duty(client: &RotaClient, form: &mut DutyForm) -> Result<(), RotaToolError> {
    let Some(duty) = form.submit() else {
        let missing = form
            .invalid_fields()
            .into_iter()
            .filter_map(|f| form.error(f))
            .collect();
        return Err(RotaToolError::IncompleteDuty(missing));
    };

    let result = client.create_duty(&duty).await;
    form.finish(match &result {
        Ok(_) => SubmitOutcome::Created,
        Err(e) => SubmitOutcome::Rejected {
            message: e.server_message().map(String::from),
        },
    });

    let message = form.banner().map(print::render_banner).unwrap_or_default();
    match result {
        Ok(created) => {
            match created.id {
                Some(id) => println!("{} ({})", message, id),
                None => println!("{}", message),
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", message);
            Err(e.into())
        }
    }
}
