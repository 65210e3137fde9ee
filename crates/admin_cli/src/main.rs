use std::error::Error;

use clap::{Args, Parser, Subcommand};
use engine::{Engine, ExpenseCmd, MoneyCents, ParticipantPolicy};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "evenly_admin")]
#[command(about = "Admin utilities for Evenly (expenses, balances, settlements)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./evenly.db?mode=rwc")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Expense(Expense),
    /// Print the net balance of every person.
    Balances,
    /// Print the transfers that settle every balance.
    Settle,
}

#[derive(Args, Debug)]
struct Expense {
    #[command(subcommand)]
    command: ExpenseCommand,
}

#[derive(Subcommand, Debug)]
enum ExpenseCommand {
    Add(ExpenseAddArgs),
    List,
    Delete(ExpenseDeleteArgs),
}

#[derive(Args, Debug)]
struct ExpenseAddArgs {
    /// Amount in major units, `.` or `,` as separator (e.g. `12.50`).
    #[arg(long)]
    amount: MoneyCents,
    #[arg(long)]
    description: String,
    #[arg(long)]
    paid_by: String,
    /// Repeat for each participant. When omitted the payer alone is used.
    #[arg(long = "participant")]
    participants: Vec<String>,
    /// Refuse the expense instead of defaulting when no participant is given.
    #[arg(long)]
    require_participants: bool,
}

#[derive(Args, Debug)]
struct ExpenseDeleteArgs {
    id: String,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;

    match cli.command {
        Command::Expense(Expense {
            command: ExpenseCommand::Add(args),
        }) => {
            let policy = if args.require_participants {
                ParticipantPolicy::RequireExplicit
            } else {
                ParticipantPolicy::PayerOnly
            };
            let engine = Engine::builder()
                .database(db.clone())
                .participant_policy(policy)
                .build()
                .await?;

            let mut cmd = ExpenseCmd::new(args.amount, args.description, args.paid_by);
            if !args.participants.is_empty() {
                cmd = cmd.participants(args.participants);
            }
            let expense = engine.create_expense(cmd).await?;
            println!(
                "created expense: {} ({} paid {} for {})",
                expense.id,
                expense.payer,
                expense.amount,
                join(&expense.participants)
            );
        }
        Command::Expense(Expense {
            command: ExpenseCommand::List,
        }) => {
            let engine = Engine::builder().database(db.clone()).build().await?;
            for expense in engine.list_expenses().await? {
                println!(
                    "{}  {}  {:>10}  {:<12} {} [{}]",
                    expense.id,
                    expense.created_at.format("%Y-%m-%d %H:%M"),
                    expense.amount,
                    expense.payer,
                    expense.description,
                    join(&expense.participants)
                );
            }
        }
        Command::Expense(Expense {
            command: ExpenseCommand::Delete(args),
        }) => {
            let engine = Engine::builder().database(db.clone()).build().await?;
            let id = engine.delete_expense(&args.id).await?;
            println!("deleted expense: {id}");
        }
        Command::Balances => {
            let engine = Engine::builder().database(db.clone()).build().await?;
            for balance in engine.balances().await? {
                println!("{:<16} {:>12.2}", balance.person, balance.balance);
            }
        }
        Command::Settle => {
            let engine = Engine::builder().database(db.clone()).build().await?;
            let settlements = engine.settlements().await?;
            if settlements.is_empty() {
                println!("all settled");
            }
            for settlement in settlements {
                println!(
                    "{} -> {}: {:.2}",
                    settlement.from_person, settlement.to_person, settlement.amount
                );
            }
        }
    }

    db.close().await?;
    Ok(())
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
