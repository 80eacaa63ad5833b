//! Queue producer commands.

use clap::{Args, Subcommand};
use lockbox_core::Config;
use lockbox_queue::{QueueClient, QueueJob};

/// Queue command arguments.
#[derive(Args)]
pub struct QueueArgs {
    #[command(subcommand)]
    pub command: QueueCommand,
}

#[derive(Subcommand)]
pub enum QueueCommand {
    /// Push a job onto the queue
    Push {
        /// Queue name (defaults to the configured queue)
        #[arg(long)]
        queue: Option<String>,

        #[command(subcommand)]
        job: PushJob,
    },

    /// Check that the queue store answers
    Ping,
}

/// Jobs that can be pushed from the command line.
#[derive(Subcommand)]
pub enum PushJob {
    /// Ask the worker to send an address-verification email
    VerifyEmail {
        /// Recipient address
        #[arg(long)]
        email: String,

        /// Verification token embedded in the link
        #[arg(long)]
        token: String,
    },

    /// Notify an owner that a password was saved
    SecretCreated {
        /// Owner id
        #[arg(long)]
        owner_id: String,

        /// Recipient address
        #[arg(long)]
        email: String,

        /// Display name of the website
        #[arg(long)]
        website_name: String,
    },
}

impl From<PushJob> for QueueJob {
    fn from(job: PushJob) -> Self {
        match job {
            PushJob::VerifyEmail { email, token } => QueueJob::VerifyEmail { email, token },
            PushJob::SecretCreated {
                owner_id,
                email,
                website_name,
            } => QueueJob::SecretCreated {
                owner_id,
                email,
                website_name,
            },
        }
    }
}

/// Run the queue command.
pub async fn run(args: QueueArgs, config: &Config) -> anyhow::Result<()> {
    let client = QueueClient::connect(&config.queue).await?;
    let result = execute(&client, args.command, config).await;
    client.disconnect().await?;
    result
}

async fn execute(
    client: &QueueClient,
    command: QueueCommand,
    config: &Config,
) -> anyhow::Result<()> {
    match command {
        QueueCommand::Push { queue, job } => {
            let queue = queue.unwrap_or_else(|| config.queue.name.clone());
            let job = QueueJob::from(job);
            client.enqueue(&queue, &job).await?;
            println!("Queued {} job on {}", job.kind(), client.key(&queue)?);
        }
        QueueCommand::Ping => {
            client.ping().await?;
            println!("PONG");
        }
    }
    Ok(())
}
