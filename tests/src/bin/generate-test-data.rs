use anyhow::Context;
use rand::{seq::SliceRandom, Rng};
use teatok_client::{
    api::{CommentId, NewComment, NewPost, NewUser, Post, RoomId, User},
    CommentsApi, HttpApi,
};

const NUM_REGISTERED_USERS: usize = 3;
const NUM_ANONYMOUS_USERS: usize = 3;

const ROOMS: &[&str] = &["food", "music", "campus", "work"];
const CATEGORIES: &[&str] = &["tea", "confession", "rant"];
const DURATIONS: &[&str] = &["1h", "24h", "7d"];

const NUM_POSTS: usize = 20;
const POST_TITLE_WORDS: usize = 6;
const POST_CONTENT_WORDS: usize = 40;

const NUM_COMMENTS: usize = 150;
const COMMENT_WORDS: usize = 15;

/// Percentage of comments that are replies to an existing top-level comment
const REPLY_PERCENT: u32 = 40;

#[derive(structopt::StructOpt)]
struct Opt {
    /// Server to fill with generated data
    #[structopt(short, long, env = "TEATOK_HOST", default_value = "http://127.0.0.1:3000")]
    host: String,
}

fn gen_words(n: usize) -> String {
    lipsum::lipsum_words_from_seed(n, rand::thread_rng().gen())
}

/// A lowercase word followed by `i`, so names never collide
fn gen_user_name(i: usize) -> String {
    let word = gen_words(1)
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    format!("{word}{i}")
}

fn pick<'a, T>(items: &'a [T]) -> anyhow::Result<&'a T> {
    items
        .choose(&mut rand::thread_rng())
        .context("picking from an empty list")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();
    let api = HttpApi::new(opt.host);

    // Generate users
    let mut users: Vec<User> = Vec::new();
    for i in 0..NUM_REGISTERED_USERS {
        let name = gen_user_name(i);
        let user = api
            .register(&NewUser {
                email: format!("{name}@example.org"),
                password: String::from("password"),
                name,
            })
            .await
            .context("registering user")?;
        println!("export TEATOK_USER_ID={} # {}", user.id.0, user.name);
        users.push(user);
    }
    for _ in 0..NUM_ANONYMOUS_USERS {
        users.push(api.anonymous().await.context("creating anonymous user")?);
    }

    // Generate posts
    let mut posts: Vec<Post> = Vec::new();
    for _ in 0..NUM_POSTS {
        let post = api
            .create_post(&NewPost {
                title: gen_words(POST_TITLE_WORDS),
                content: gen_words(POST_CONTENT_WORDS),
                author_id: pick(&users)?.id.clone(),
                room_id: RoomId(String::from(*pick(ROOMS)?)),
                category: String::from(*pick(CATEGORIES)?),
                duration: String::from(*pick(DURATIONS)?),
                is_voice_note: false,
            })
            .await
            .context("creating post")?;
        posts.push(post);
    }

    // Generate comments, replying only to top-level ones
    let mut top_level: Vec<(usize, CommentId)> = Vec::new();
    for _ in 0..NUM_COMMENTS {
        let reply = !top_level.is_empty() && rand::thread_rng().gen_ratio(REPLY_PERCENT, 100);
        let (post, parent) = match reply {
            true => {
                let (post, parent) = pick(&top_level)?;
                (*post, Some(parent.clone()))
            }
            false => (rand::thread_rng().gen_range(0..posts.len()), None),
        };
        let comment = api
            .create_comment(&NewComment {
                post_id: posts[post].id.clone(),
                author_id: pick(&users)?.id.clone(),
                content: gen_words(COMMENT_WORDS),
                parent_comment_id: parent,
            })
            .await
            .context("creating comment")?;
        if !comment.is_reply() {
            top_level.push((post, comment.id));
        }
    }

    tracing::info!(
        users = users.len(),
        posts = posts.len(),
        comments = NUM_COMMENTS,
        "generated test data"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_words_have_the_requested_length() {
        assert_eq!(gen_words(COMMENT_WORDS).split_whitespace().count(), COMMENT_WORDS);
    }

    #[test]
    fn generated_user_names_are_distinct_handles() {
        let names = (0..NUM_REGISTERED_USERS).map(gen_user_name).collect::<Vec<_>>();
        for (i, name) in names.iter().enumerate() {
            assert!(name.ends_with(&i.to_string()), "{name}");
            assert!(name.chars().all(|c| c.is_alphanumeric()), "{name}");
            assert!(name.len() > i.to_string().len(), "{name}");
        }
        let mut dedup = names.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), names.len());
    }
}
