use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mygraph::client::ApiClient;
use mygraph::config::DEFAULT_GRAPHQL_ENDPOINT;
use mygraph::logging;
use mygraph::ui::{Board, Outcome, QueryState, StdConsole};

/// Terminal client for the mygraph users/posts API.
#[derive(Parser, Debug)]
#[command(name = "mygraph-cli", version, about)]
struct Cli {
    /// GraphQL endpoint URL
    #[arg(long, env = "GRAPHQL_ENDPOINT", default_value = DEFAULT_GRAPHQL_ENDPOINT)]
    endpoint: String,

    /// Answer yes to confirmation prompts
    #[arg(short = 'y', long)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List users, newest first
    Users,
    /// Show one user and their posts
    User { id: String },
    /// List all posts with their authors
    Posts,
    /// Show one post
    Post { id: String },
    CreateUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Change a user's name and/or email
    UpdateUser {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a user together with their posts
    DeleteUser { id: String },
    CreatePost {
        /// Author user id
        #[arg(long)]
        author: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: Option<String>,
    },
    UpdatePost {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    DeletePost { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    logging::init("mygraph=warn");

    let cli = Cli::parse();
    let mut client = ApiClient::http(cli.endpoint);
    let mut console = StdConsole::new(cli.yes);
    let mut board = Board::new(&mut client, &mut console);

    let ok = match cli.command {
        Command::Users => view_ok(board.show_users().await),
        Command::User { id } => view_ok(board.show_user(&id).await),
        Command::Posts => view_ok(board.show_posts().await),
        Command::Post { id } => view_ok(board.show_post(&id).await),
        Command::CreateUser { name, email } => action_ok(board.create_user(&name, &email).await),
        Command::UpdateUser { id, name, email } => {
            action_ok(board.update_user(&id, name.as_deref(), email.as_deref()).await)
        }
        Command::DeleteUser { id } => action_ok(board.delete_user(&id).await),
        Command::CreatePost {
            author,
            title,
            content,
        } => action_ok(board.create_post(&author, &title, content.as_deref()).await),
        Command::UpdatePost { id, title, content } => {
            action_ok(board.update_post(&id, title.as_deref(), content.as_deref()).await)
        }
        Command::DeletePost { id } => action_ok(board.delete_post(&id).await),
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn view_ok(state: QueryState<()>) -> bool {
    matches!(state, QueryState::Ready(()))
}

fn action_ok(outcome: Outcome) -> bool {
    matches!(outcome, Outcome::Done | Outcome::Cancelled)
}
