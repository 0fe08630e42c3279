use anyhow::{anyhow, Context};
use chrono::Utc;
use teatok_client::{
    api::{CommentId, Credentials, NewPost, NewUser, PostId, RoomId, User, UserId},
    execute, time_ago, HttpApi, Identity, Request, Thread, ThreadState,
    EMPTY_THREAD_MESSAGE,
};

#[derive(structopt::StructOpt)]
struct Opt {
    #[structopt(short, long, env = "TEATOK_HOST")]
    host: String,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// Get a fresh anonymous identity
    Anonymous,

    /// Create an account
    Register {
        name: String,
        email: String,
        password: String,
    },

    /// Log into an existing account
    Login { email: String, password: String },

    /// Log the current identity out
    Logout,

    /// List posts, newest first
    Posts {
        #[structopt(long)]
        room: Option<String>,
    },

    /// Create a post
    Post {
        room: String,
        title: String,
        content: String,

        #[structopt(long, default_value = "tea")]
        category: String,

        #[structopt(long, default_value = "24h")]
        duration: String,
    },

    /// Show the comments of a post
    Comments { post: String },

    /// Comment on a post
    Comment { post: String, content: String },

    /// Reply to a top-level comment
    Reply {
        post: String,
        parent: String,
        content: String,
    },

    /// Delete one of your top-level comments
    Delete { post: String, comment: String },
}

/// Reads the acting identity from the environment, if one was exported
fn identity() -> anyhow::Result<Option<Identity>> {
    let id = match std::env::var("TEATOK_USER_ID") {
        Ok(id) => id,
        Err(std::env::VarError::NotPresent) => return Ok(None),
        Err(e) => return Err(e).context("retrieving TEATOK_USER_ID environment variable"),
    };
    let name = std::env::var("TEATOK_USER_NAME")
        .context("retrieving TEATOK_USER_NAME environment variable")?;
    Ok(Some(Identity {
        id: UserId(id),
        name,
        alias: std::env::var("TEATOK_USER_ALIAS").ok(),
    }))
}

fn print_identity(u: &User) {
    println!("export TEATOK_USER_ID={}", u.id.0);
    println!("export TEATOK_USER_NAME={}", u.name);
    if let Some(alias) = &u.alias {
        println!("export TEATOK_USER_ALIAS={alias}");
    }
}

fn print_thread(thread: &Thread) {
    let now = Utc::now();
    match thread.state() {
        ThreadState::Empty => println!("{EMPTY_THREAD_MESSAGE}"),
        ThreadState::Comments(comments) => {
            for c in comments {
                println!(
                    "[{}] {} ({}): {}",
                    c.id.0,
                    c.author.display_name(),
                    time_ago(c.created_at, now),
                    c.content
                );
                for r in &c.replies {
                    println!(
                        "    [{}] {} ({}): {}",
                        r.id.0,
                        r.author.display_name(),
                        time_ago(r.created_at, now),
                        r.content
                    );
                }
            }
        }
        ThreadState::Closed { .. } | ThreadState::Loading => (),
    }
}

/// Runs the request a thread asked for, feeding the result back into it
async fn run(api: &HttpApi, thread: &mut Thread, req: Option<Request>) -> anyhow::Result<()> {
    let req =
        req.ok_or_else(|| anyhow!("nothing to send: empty content or no TEATOK_USER_ID set"))?;
    match thread.apply(execute(api, req).await) {
        Some(n) if n.is_error() => Err(anyhow!("{}", n.description)),
        Some(n) => {
            eprintln!("{}", n.description);
            Ok(())
        }
        None => Ok(()),
    }
}

async fn open_thread(api: &HttpApi, post: String) -> anyhow::Result<Thread> {
    let mut thread = Thread::new(PostId(post), identity()?);
    let req = thread.open();
    run(api, &mut thread, req).await?;
    Ok(thread)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();
    let api = HttpApi::new(opt.host);

    match opt.cmd {
        Command::Anonymous => print_identity(&api.anonymous().await?),
        Command::Register {
            name,
            email,
            password,
        } => print_identity(
            &api.register(&NewUser {
                name,
                email,
                password,
            })
            .await?,
        ),
        Command::Login { email, password } => {
            print_identity(&api.login(&Credentials { email, password }).await?)
        }
        Command::Logout => {
            let me = identity()?.ok_or_else(|| anyhow!("TEATOK_USER_ID is not set"))?;
            println!("{}", api.logout(&me.id).await?.message);
        }
        Command::Posts { room } => {
            let room = room.map(RoomId);
            for p in api.fetch_posts(room.as_ref()).await? {
                println!(
                    "[{}] {} in {} by {}: {}",
                    p.id.0,
                    time_ago(p.created_at, Utc::now()),
                    p.room_id.0,
                    p.author.display_name(),
                    p.title
                );
            }
        }
        Command::Post {
            room,
            title,
            content,
            category,
            duration,
        } => {
            let me = identity()?.ok_or_else(|| anyhow!("TEATOK_USER_ID is not set"))?;
            let post = api
                .create_post(&NewPost {
                    title,
                    content,
                    author_id: me.id,
                    room_id: RoomId(room),
                    category,
                    duration,
                    is_voice_note: false,
                })
                .await?;
            println!("{}", post.id.0);
        }
        Command::Comments { post } => print_thread(&open_thread(&api, post).await?),
        Command::Comment { post, content } => {
            let mut thread = open_thread(&api, post).await?;
            thread.set_draft(content);
            let req = thread.submit_comment();
            run(&api, &mut thread, req).await?;
            print_thread(&thread);
        }
        Command::Reply {
            post,
            parent,
            content,
        } => {
            let mut thread = open_thread(&api, post).await?;
            let parent = CommentId(parent);
            thread.start_reply(parent.clone());
            thread.set_reply_draft(content);
            let req = thread.submit_reply(parent);
            run(&api, &mut thread, req).await?;
            print_thread(&thread);
        }
        Command::Delete { post, comment } => {
            let mut thread = open_thread(&api, post).await?;
            let comment = CommentId(comment);
            if let Some(c) = thread.comments().iter().find(|c| c.id == comment) {
                if !thread.can_delete(c) {
                    tracing::warn!(?comment, "this does not look like your comment, trying anyway");
                }
            }
            let req = thread.delete(comment);
            run(&api, &mut thread, req).await?;
            print_thread(&thread);
        }
    }

    Ok(())
}
