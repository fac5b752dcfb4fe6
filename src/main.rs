use callingbird_console::{
    mapping::from_hours_records,
    models::{DayKey, WeeklyAvailability},
    screens::StaffEditor,
    ApiClient, ConsoleConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with conditional JSON/text output
    let use_json = std::env::var("LOG_FORMAT")
        .unwrap_or_else(|_| "text".to_string()) == "json";

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,callingbird_console=debug".into());

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    dotenvy::dotenv().ok();

    let config = ConsoleConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {}", e);
        e
    })?;

    let client = ApiClient::from_config(&config)?;
    tracing::info!(base_url = client.base_url(), "Backend client ready");

    let command = std::env::args().nth(1).unwrap_or_else(|| "staff".to_string());
    match command.as_str() {
        "staff" => print_staff(client).await?,
        "hours" => {
            let (week, _) = from_hours_records(&client.get_company_hours().await?);
            println!("Company hours");
            print_week(&week);
        }
        "calls" => {
            let calls = client.list_calls().await?;
            println!("{}", serde_json::to_string_pretty(&calls)?);
        }
        other => {
            tracing::error!(command = other, "Unknown command");
            return Err(format!("unknown command '{}', expected staff, hours or calls", other).into());
        }
    }

    Ok(())
}

async fn print_staff(client: ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    let mut editor = StaffEditor::new(client);
    editor.load().await?;

    for member in editor.members() {
        let role = if member.role.is_empty() { "-" } else { member.role.as_str() };
        println!("{} ({})", member.name, role);
        print_week(&member.availability);
        println!();
    }

    Ok(())
}

fn print_week(week: &WeeklyAvailability) {
    for day in DayKey::ALL {
        let schedule = week.day(day);
        let blocks = schedule
            .blocks
            .iter()
            .map(|b| format!("{}-{}", b.start_time, b.end_time))
            .collect::<Vec<_>>()
            .join(", ");

        if schedule.is_working {
            println!("  {:<10} {}", day, blocks);
        } else {
            println!("  {:<10} off", day);
        }
    }
}
