// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitness-Client command line
//!
//! Logs in against the fitness API, keeps the credential pair in a local
//! token file, and lists exercises, workouts and statistics.

use clap::{Parser, Subcommand};
use fitness_client::{
    config::Config,
    models::{AuthState, NewExercise, RegistrationForm, Unit},
    store::FileTokenStore,
    FitnessClient,
};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fitness-client", about = "Fitness tracker API client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the credential pair
    Login {
        username: String,
        #[arg(long, env = "FITNESS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored credential pair
    Logout,
    /// Show the user of the stored session
    Whoami,
    /// Create an account
    Register {
        username: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, env = "FITNESS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// List exercises, optionally filtered by name or category
    Exercises {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Add an exercise to the catalog
    AddExercise {
        name: String,
        #[arg(long, default_value = "Pecho")]
        category: String,
        #[arg(long, default_value = "Fuerza")]
        kind: String,
        /// reps, minutes or km
        #[arg(long, default_value = "reps")]
        unit: String,
    },
    /// Delete an exercise (asks for confirmation unless --yes)
    DeleteExercise {
        id: u64,
        #[arg(long)]
        yes: bool,
    },
    /// List workouts
    Workouts,
    /// Show one workout with its entries
    Workout { id: u64 },
    /// Show aggregate statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    tracing::debug!(api_url = %config.api_url, "Starting Fitness-Client");

    let store = Arc::new(FileTokenStore::new(&config.token_path));
    let client = FitnessClient::new(config, store)?;
    client.auth.restore();

    match cli.command {
        Command::Login { username, password } => {
            let claims = client.auth.login(&username, &password).await?;
            println!("Logged in as user {}", claims.user_id);
        }
        Command::Logout => {
            client.auth.logout();
            println!("Logged out");
        }
        Command::Whoami => match client.auth.state() {
            AuthState::Authenticated(claims) => println!("User {}", claims.user_id),
            AuthState::Unauthenticated => println!("Not logged in"),
        },
        Command::Register {
            username,
            email,
            password,
        } => {
            let form = RegistrationForm::new(username, email, password.clone(), password);
            match client.auth.register(&form).await {
                Ok(user) => println!("Registered {} (id {})", user.username, user.id),
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    return Err(e.into());
                }
            }
        }
        Command::Exercises { search } => {
            let mut screen = client.exercise_screen();
            screen.mount().await?;
            screen.set_search(search);
            for exercise in screen.filtered() {
                println!(
                    "{:>4}  {:<30} {:<10} {:<12} {:?}",
                    exercise.id, exercise.name, exercise.category, exercise.kind, exercise.unit
                );
            }
        }
        Command::AddExercise {
            name,
            category,
            kind,
            unit,
        } => {
            let unit = match unit.as_str() {
                "reps" => Unit::Reps,
                "minutes" | "minutos" => Unit::Minutes,
                "km" => Unit::Kilometers,
                other => return Err(format!("unknown unit: {}", other).into()),
            };
            let draft = NewExercise {
                category,
                kind,
                unit,
                ..NewExercise::new(name)
            };

            let mut screen = client.exercise_screen();
            let created = screen.create(&draft).await?;
            println!(
                "Created exercise {} ({} exercises total)",
                created.id,
                screen.working_set().len()
            );
        }
        Command::DeleteExercise { id, yes } => {
            let mut screen = client.exercise_screen();
            let confirm = |prompt: &str| yes || ask(prompt);
            if screen.delete(id, &confirm).await? {
                println!("Deleted exercise {}", id);
            }
        }
        Command::Workouts => {
            let mut screen = client.workout_screen();
            screen.mount().await?;
            for workout in screen.filtered() {
                println!(
                    "{:>4}  {}  {:<15} {} entries",
                    workout.id,
                    workout.datetime.format("%Y-%m-%d"),
                    workout.location,
                    workout.entries.len()
                );
            }
        }
        Command::Workout { id } => {
            let mut screen = client.workout_detail_screen(id);
            screen.load().await?;
            if let Some(workout) = screen.workout() {
                println!("{} at {}", workout.datetime.format("%Y-%m-%d"), workout.location);
                if let Some(notes) = &workout.notes {
                    println!("{}", notes);
                }
            }
            for entry in screen.entries() {
                println!(
                    "  {:<30} {} x {} @ {} kg",
                    entry.exercise_name.as_deref().unwrap_or("?"),
                    entry.sets,
                    entry.amount,
                    entry.weight
                );
            }
        }
        Command::Stats => {
            let mut screen = client.dashboard_screen();
            screen.load().await?;
            if let Some(stats) = screen.stats() {
                println!("Workouts: {}", stats.total_workouts);
                println!("Entries:  {}", stats.total_entries);
                println!("Last 4 weeks: {}", stats.recent_workouts());
                for exercise in &stats.frequent_exercises {
                    println!("  {:<30} {}", exercise.exercise_name, exercise.count);
                }
            }
        }
    }

    Ok(())
}

/// Yes/no prompt on stdin.
fn ask(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    let _ = std::io::stdout().flush();

    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y" | "yes")
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fitness_client=info,warn")),
        )
        .with(format)
        .init();
}
