use anyhow::Result;
use apuesta::api::*;
use apuesta::client::Client;
use clap::{Parser, Subcommand};

#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, default_value = "http://127.0.0.1:8081")]
    url: String,
}
#[derive(Subcommand)]
enum Commands {
    /// Show the card currently on top of the feed
    Current,
    Featured,
    /// Show the selections, multiplier and payout
    Coupon,
    Gesture,
    BeginDrag {
        #[arg(short, long, allow_negative_numbers = true)]
        x: f64,
    },
    MoveDrag {
        #[arg(short, long, allow_negative_numbers = true)]
        x: f64,
    },
    CancelDrag,
    ReleaseDrag,
    /// Run a whole drag through the given pointer positions
    Swipe {
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        path: Vec<f64>,
    },
    /// Vote with the Yes/No buttons
    Press {
        #[arg(short, long)]
        vote: String,
    },
    Remove {
        #[arg(short, long)]
        question: QuestionId,
    },
    Clear,
    Stake {
        #[arg(short, long)]
        value: String,
    },
    CreateCoupon,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Args::parse();
    let client = Client::new(cli.url);

    match cli.command {
        Commands::Current => match client.get_current().await? {
            Some(question) => print_question(&question),
            None => println!("No more questions"),
        },
        Commands::Featured => {
            for question in client.get_featured().await? {
                print_question(&question);
            }
        }
        Commands::Coupon => print_coupon(&client.get_coupon().await?),
        Commands::Gesture => println!("{:#?}", client.get_gesture().await?),
        Commands::BeginDrag { x } => {
            if !client.begin_drag(x).await? {
                println!("Drag not started");
            }
        }
        Commands::MoveDrag { x } => println!("{:#?}", client.move_drag(x).await?),
        Commands::CancelDrag => client.cancel_drag().await?,
        Commands::ReleaseDrag => print_outcome(&client.release_drag().await?),
        Commands::Swipe { path } => print_outcome(&client.swipe(path).await?),
        Commands::Press { vote } => print_outcome(&client.press(vote.parse()?).await?),
        Commands::Remove { question } => {
            if client.remove(question).await? {
                println!("Removed question {}", question);
            } else {
                println!("Question {} is not on the coupon", question);
            }
        }
        Commands::Clear => print_coupon(&client.clear().await?),
        Commands::Stake { value } => println!("Stake: {}", client.set_stake(value).await?),
        Commands::CreateCoupon => {
            let receipt = client.create_coupon().await?;
            println!(
                "Created coupon at {}: {} selections, stake {}, multiplier {:.2}, payout {:.0}",
                receipt.created,
                receipt.selections.len(),
                receipt.stake,
                receipt.multiplier,
                receipt.payout
            );
        }
    }
    Ok(())
}

fn print_question(question: &Question) {
    println!(
        "#{} [{}] {}\n  Yes {} | No {} | {}% yes | {} votes | {} left",
        question.id,
        question.category,
        question.title,
        question.yes_odds,
        question.no_odds,
        question.yes_percentage,
        question.votes,
        question.time_left
    );
}
fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Committed {
            selection,
            stack_complete,
        } => {
            println!(
                "Voted {} on #{} at {}{}",
                selection.vote,
                selection.question,
                selection.odds,
                if selection.boosted { " (boosted)" } else { "" }
            );
            if *stack_complete {
                println!("Coupon is full");
            }
        }
        Outcome::Reset => println!("Card snapped back"),
    }
}
fn print_coupon(coupon: &CouponSummary) {
    for selection in &coupon.selections {
        println!(
            "#{} {} @ {} ({}%)",
            selection.question, selection.vote, selection.odds, selection.percentage
        );
    }
    println!(
        "{}/{} selections | stake {} | x{} | payout {}",
        coupon.selections.len(),
        coupon.capacity,
        coupon.stake,
        coupon.display_multiplier,
        coupon.display_payout
    );
}
