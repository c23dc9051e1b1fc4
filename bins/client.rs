//! Command-line client for `blog.BlogService`.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use server::proto::{
    blog_service_client::BlogServiceClient, Blog, CreateBlogRequest, DeleteBlogRequest, ListBlogRequest,
    ReadBlogRequest, UpdateBlogRequest,
};
use tonic::transport::Channel;
use tonic::Status;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "Talk to a running blog server")]
struct Cli {
    /// Server endpoint.
    #[arg(long, default_value = "http://127.0.0.1:50051")]
    addr: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a blog; the server assigns its id.
    Create(BlogArgs),
    /// Fetch one blog by id.
    Read { id: String },
    /// Replace every field of an existing blog.
    Update {
        id: String,
        #[command(flatten)]
        blog: BlogArgs,
    },
    /// Delete one blog by id.
    Delete { id: String },
    /// Stream every blog.
    List,
}

#[derive(Args, Debug)]
struct BlogArgs {
    #[arg(long, default_value = "Omar")]
    author: String,
    #[arg(long, default_value = "My First Blog")]
    title: String,
    #[arg(long, default_value = "Content of the first blog")]
    content: String,
}

impl BlogArgs {
    fn into_blog(self, id: String) -> Blog {
        Blog { id, author_id: self.author, title: self.title, content: self.content }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_default();
    let cli = Cli::parse();

    let mut client = match BlogServiceClient::connect(cli.addr.clone()).await {
        Ok(c) => c,
        Err(e) => {
            error!(addr = %cli.addr, error = %e, "cannot connect to blog server");
            return ExitCode::FAILURE;
        }
    };

    match execute(&mut client, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(status) => {
            // same shape the server logs: "<code>: <message>"
            error!("{:?}: {}", status.code(), status.message());
            ExitCode::FAILURE
        }
    }
}

async fn execute(client: &mut BlogServiceClient<Channel>, command: Command) -> Result<(), Status> {
    match command {
        Command::Create(args) => {
            let blog = args.into_blog(String::new());
            let res = client.create_blog(CreateBlogRequest { blog: Some(blog) }).await?.into_inner();
            info!("blog created: {:?}", res.blog);
        }
        Command::Read { id } => {
            let res = client.read_blog(ReadBlogRequest { blog_id: id }).await?.into_inner();
            info!("blog found: {:?}", res.blog);
        }
        Command::Update { id, blog } => {
            let res = client
                .update_blog(UpdateBlogRequest { blog: Some(blog.into_blog(id)) })
                .await?
                .into_inner();
            info!("blog updated: {:?}", res.blog);
        }
        Command::Delete { id } => {
            let res = client.delete_blog(DeleteBlogRequest { blog_id: id }).await?.into_inner();
            info!("blog deleted: {}", res.blog_id);
        }
        Command::List => {
            let mut stream = client.list_blog(ListBlogRequest {}).await?.into_inner();
            let mut received = 0usize;
            while let Some(res) = stream.message().await? {
                received += 1;
                info!("blog received: {:?}", res.blog);
            }
            info!(received, "list finished");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_update_with_defaults() {
        let cli = Cli::try_parse_from(["client", "update", "62fcaacf410e7788bd475335", "--title", "New Title"])
            .expect("parses");
        assert_eq!(cli.addr, "http://127.0.0.1:50051");
        match cli.command {
            Command::Update { id, blog } => {
                let blog = blog.into_blog(id);
                assert_eq!(blog.id, "62fcaacf410e7788bd475335");
                assert_eq!(blog.title, "New Title");
                assert_eq!(blog.author_id, "Omar");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn read_requires_an_id() {
        assert!(Cli::try_parse_from(["client", "read"]).is_err());
    }
}
