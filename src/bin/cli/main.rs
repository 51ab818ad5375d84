use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};

#[derive(Parser, Debug)]
#[command(name = "s3-actions-cli")]
#[command(about = "CLI for calling S3 actions on an s3-actions server", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(short, long, env = "S3_ACTIONS_URL", default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload a local file
    Put {
        /// Bucket name
        bucket: String,
        /// Path of the file on the server host
        file_path: String,
        /// Object key, defaults to the file name
        #[arg(short, long)]
        key: Option<String>,
        /// Storage class, e.g. STANDARD_IA
        #[arg(long)]
        storage_class: Option<String>,
        #[arg(long)]
        content_type: Option<String>,
        /// Tags as key=value&key2=value2
        #[arg(long)]
        tags: Option<String>,
        /// Config entry to use instead of the first one
        #[arg(long)]
        entry_id: Option<String>,
    },

    /// Copy an object
    Copy {
        key_source: String,
        key_destination: String,
        /// Bucket used for both sides unless overridden
        #[arg(short, long)]
        bucket: Option<String>,
        #[arg(long)]
        bucket_source: Option<String>,
        #[arg(long)]
        bucket_destination: Option<String>,
        #[arg(long)]
        entry_id: Option<String>,
    },

    /// Delete an object
    Delete {
        bucket: String,
        key: String,
        #[arg(long)]
        entry_id: Option<String>,
    },

    /// Request a presigned GET URL; it arrives as an s3_signed_url event
    SignedUrl {
        bucket: String,
        key: String,
        /// Expiry in seconds
        #[arg(short, long)]
        duration: Option<u64>,
        /// Message passed through to the event
        #[arg(short, long)]
        message: Option<String>,
        #[arg(long)]
        entry_id: Option<String>,
    },

    /// List registered services
    Services,

    /// Manage config entries
    Entries {
        #[command(subcommand)]
        command: EntryCommands,
    },
}

#[derive(Subcommand, Debug)]
enum EntryCommands {
    /// List config entries
    List,

    /// Create a config entry
    Add {
        #[arg(long, env = "AWS_ACCESS_KEY_ID")]
        access_key_id: String,
        #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
        secret_access_key: String,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        endpoint_url: Option<String>,
    },

    /// Remove a config entry
    Remove { entry_id: String },
}

/// Build a JSON object from the fields that are set
fn service_data<const N: usize>(fields: [(&str, Option<Value>); N]) -> Value {
    let map: Map<String, Value> = fields
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
        .collect();
    Value::Object(map)
}

impl Commands {
    /// The (service, data) pair for action subcommands
    fn service_call(&self) -> Option<(&'static str, Value)> {
        let call = match self {
            Commands::Put {
                bucket,
                file_path,
                key,
                storage_class,
                content_type,
                tags,
                entry_id,
            } => (
                "put",
                service_data([
                    ("bucket", Some(json!(bucket))),
                    ("file_path", Some(json!(file_path))),
                    ("key", key.as_ref().map(|v| json!(v))),
                    ("storage_class", storage_class.as_ref().map(|v| json!(v))),
                    ("content_type", content_type.as_ref().map(|v| json!(v))),
                    ("tags", tags.as_ref().map(|v| json!(v))),
                    ("entry_id", entry_id.as_ref().map(|v| json!(v))),
                ]),
            ),
            Commands::Copy {
                key_source,
                key_destination,
                bucket,
                bucket_source,
                bucket_destination,
                entry_id,
            } => (
                "copy",
                service_data([
                    ("key_source", Some(json!(key_source))),
                    ("key_destination", Some(json!(key_destination))),
                    ("bucket", bucket.as_ref().map(|v| json!(v))),
                    ("bucket_source", bucket_source.as_ref().map(|v| json!(v))),
                    ("bucket_destination", bucket_destination.as_ref().map(|v| json!(v))),
                    ("entry_id", entry_id.as_ref().map(|v| json!(v))),
                ]),
            ),
            Commands::Delete {
                bucket,
                key,
                entry_id,
            } => (
                "delete",
                service_data([
                    ("bucket", Some(json!(bucket))),
                    ("key", Some(json!(key))),
                    ("entry_id", entry_id.as_ref().map(|v| json!(v))),
                ]),
            ),
            Commands::SignedUrl {
                bucket,
                key,
                duration,
                message,
                entry_id,
            } => (
                "signed_url",
                service_data([
                    ("bucket", Some(json!(bucket))),
                    ("key", Some(json!(key))),
                    ("duration", duration.map(|v| json!(v))),
                    ("message", message.as_ref().map(|v| json!(v))),
                    ("entry_id", entry_id.as_ref().map(|v| json!(v))),
                ]),
            ),
            Commands::Services | Commands::Entries { .. } => return None,
        };
        Some(call)
    }
}

struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value> {
        let response = request.send().await.context("Request to server failed")?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            let message = body["message"].as_str().unwrap_or("no error message");
            anyhow::bail!("Server returned {}: {}", status, message);
        }
        Ok(body)
    }

    async fn get(&self, path: &str) -> Result<Value> {
        self.send(self.http.get(format!("{}{}", self.base_url, path)))
            .await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.send(self.http.post(format!("{}{}", self.base_url, path)).json(body))
            .await
    }

    async fn delete(&self, path: &str) -> Result<Value> {
        self.send(self.http.delete(format!("{}{}", self.base_url, path)))
            .await
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = ApiClient::new(&cli.url);

    if let Some((service, data)) = cli.command.service_call() {
        client
            .post(&format!("/api/services/s3/{}", service), &data)
            .await?;
        // Action failures are only visible in the server log
        println!("Called s3.{}", service);
        return Ok(());
    }

    match cli.command {
        Commands::Services => print_json(&client.get("/api/services").await?)?,
        Commands::Entries { command } => match command {
            EntryCommands::List => {
                print_json(&client.get("/api/config/config_entries/entry").await?)?
            }
            EntryCommands::Add {
                access_key_id,
                secret_access_key,
                region,
                endpoint_url,
            } => {
                let body = service_data([
                    ("aws_access_key_id", Some(json!(access_key_id))),
                    ("aws_secret_access_key", Some(json!(secret_access_key))),
                    ("region_name", region.map(|v| json!(v))),
                    ("endpoint_url", endpoint_url.map(|v| json!(v))),
                ]);
                print_json(
                    &client
                        .post("/api/config/config_entries/flow", &body)
                        .await?,
                )?
            }
            EntryCommands::Remove { entry_id } => print_json(
                &client
                    .delete(&format!("/api/config/config_entries/entry/{}", entry_id))
                    .await?,
            )?,
        },
        _ => {}
    }

    Ok(())
}
