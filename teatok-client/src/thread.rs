use crate::{
    api::{Comment, CommentId, NewComment, PostId},
    Error, Identity, Notice, Request, Response,
};

pub const EMPTY_THREAD_MESSAGE: &str = "No comments yet. Be the first to comment!";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Submission {
    Comment,
    Reply(CommentId),
}

/// What a view should currently render for a thread
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ThreadState<'a> {
    Closed { count: usize },
    Loading,
    Empty,
    Comments(&'a [Comment]),
}

/// Comments of one post, as seen by one comments section
///
/// Every user intent returns the `Request` it needs performed, if any. The
/// caller runs it (see `execute`) and hands the `Response` back to `apply`,
/// which patches the comment list in place.
#[derive(Clone, Debug)]
pub struct Thread {
    post: PostId,
    identity: Option<Identity>,

    /// Top-level comments, newest first
    comments: Vec<Comment>,

    is_open: bool,
    loading: bool,

    /// Set while a comment or reply is being created
    submitting: Option<Submission>,

    draft: String,
    reply_draft: String,
    replying_to: Option<CommentId>,
}

impl Thread {
    pub fn new(post: PostId, identity: Option<Identity>) -> Thread {
        Thread {
            post,
            identity,
            comments: Vec::new(),
            is_open: false,
            loading: false,
            submitting: None,
            draft: String::new(),
            reply_draft: String::new(),
            replying_to: None,
        }
    }

    pub fn post(&self) -> &PostId {
        &self.post
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn set_identity(&mut self, identity: Option<Identity>) {
        self.identity = identity;
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_some()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn reply_draft(&self) -> &str {
        &self.reply_draft
    }

    pub fn replying_to(&self) -> Option<&CommentId> {
        self.replying_to.as_ref()
    }

    pub fn state(&self) -> ThreadState<'_> {
        match (self.is_open, self.loading) {
            (false, _) => ThreadState::Closed {
                count: self.comments.len(),
            },
            (true, true) => ThreadState::Loading,
            (true, false) if self.comments.is_empty() => ThreadState::Empty,
            (true, false) => ThreadState::Comments(&self.comments),
        }
    }

    /// Opens the thread, fetching its comments unless some are already known
    ///
    /// A thread without any comment fetches again on every reopening.
    pub fn open(&mut self) -> Option<Request> {
        if self.is_open {
            return None;
        }
        self.is_open = true;
        if !self.comments.is_empty() {
            return None;
        }
        tracing::debug!(post = ?self.post, "loading comments");
        self.loading = true;
        Some(Request::Load(self.post.clone()))
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn toggle(&mut self) -> Option<Request> {
        match self.is_open {
            true => {
                self.close();
                None
            }
            false => self.open(),
        }
    }

    pub fn set_draft(&mut self, text: String) {
        self.draft = text;
    }

    pub fn set_reply_draft(&mut self, text: String) {
        self.reply_draft = text;
    }

    /// Opens the reply composer under `comment`, or closes it if it already was there
    pub fn start_reply(&mut self, comment: CommentId) {
        self.replying_to = match self.replying_to.take() {
            Some(c) if c == comment => None,
            _ => Some(comment),
        };
    }

    pub fn cancel_reply(&mut self) {
        self.replying_to = None;
        self.reply_draft.clear();
    }

    /// Submissions wait for the first load, which would otherwise overwrite them
    fn is_busy(&self) -> bool {
        self.loading || self.is_submitting()
    }

    pub fn can_submit_comment(&self) -> bool {
        !self.is_busy() && !self.draft.trim().is_empty()
    }

    pub fn can_submit_reply(&self) -> bool {
        !self.is_busy() && !self.reply_draft.trim().is_empty()
    }

    /// Whether to offer deleting `comment` to the acting user
    ///
    /// This compares user names only and is a display hint: the server decides
    /// whether the deletion actually goes through.
    pub fn can_delete(&self, comment: &Comment) -> bool {
        self.identity
            .as_ref()
            .map(|i| i.name == comment.author.name)
            .unwrap_or(false)
    }

    pub fn submit_comment(&mut self) -> Option<Request> {
        let content = self.draft.trim();
        if self.is_busy() || content.is_empty() {
            return None;
        }
        let identity = self.identity.as_ref()?;
        let req = NewComment {
            post_id: self.post.clone(),
            author_id: identity.id.clone(),
            content: String::from(content),
            parent_comment_id: None,
        };
        self.submitting = Some(Submission::Comment);
        Some(Request::Create(req))
    }

    pub fn submit_reply(&mut self, parent: CommentId) -> Option<Request> {
        let content = self.reply_draft.trim();
        if self.is_busy() || content.is_empty() {
            return None;
        }
        let identity = self.identity.as_ref()?;
        let req = NewComment {
            post_id: self.post.clone(),
            author_id: identity.id.clone(),
            content: String::from(content),
            parent_comment_id: Some(parent.clone()),
        };
        self.submitting = Some(Submission::Reply(parent));
        Some(Request::Create(req))
    }

    pub fn delete(&mut self, comment: CommentId) -> Option<Request> {
        let identity = self.identity.as_ref()?;
        Some(Request::Delete {
            comment,
            actor: identity.id.clone(),
        })
    }

    /// Applies the outcome of a request, returning what to tell the user
    pub fn apply(&mut self, resp: Response) -> Option<Notice> {
        match resp {
            Response::Loaded(res) => {
                self.loading = false;
                match res {
                    Ok(comments) => {
                        tracing::debug!(post = ?self.post, num = comments.len(), "loaded comments");
                        self.comments = comments;
                        None
                    }
                    Err(err) => {
                        tracing::error!(post = ?self.post, ?err, "failed to load comments");
                        Some(Notice::error("Failed to load comments"))
                    }
                }
            }
            Response::Created(res) => {
                let submission = match self.submitting.take() {
                    Some(s) => s,
                    None => {
                        tracing::warn!(?res, "got a comment creation result with nothing submitted");
                        return None;
                    }
                };
                match (submission, res) {
                    (Submission::Comment, Ok(comment)) => {
                        self.insert_comment(comment);
                        self.draft.clear();
                        Some(Notice::success("Comment posted!"))
                    }
                    (Submission::Reply(parent), Ok(reply)) => {
                        let parent = reply.parent_comment_id.clone().unwrap_or(parent);
                        self.insert_reply(&parent, reply);
                        self.reply_draft.clear();
                        self.replying_to = None;
                        Some(Notice::success("Reply posted!"))
                    }
                    (Submission::Comment, Err(err)) => {
                        tracing::error!(?err, "failed to create comment");
                        Some(failure_notice(&err, "Failed to post comment"))
                    }
                    (Submission::Reply(_), Err(err)) => {
                        tracing::error!(?err, "failed to create reply");
                        Some(failure_notice(&err, "Failed to post reply"))
                    }
                }
            }
            Response::Deleted(id, Ok(())) => {
                self.remove_comment(&id);
                Some(Notice::success("Comment deleted"))
            }
            Response::Deleted(id, Err(err)) => {
                tracing::error!(comment = ?id, ?err, "failed to delete comment");
                Some(failure_notice(&err, "Failed to delete comment"))
            }
        }
    }

    pub fn insert_comment(&mut self, comment: Comment) {
        self.comments.insert(0, comment);
    }

    /// Appends `reply` under `parent`, dropping it if the parent is not loaded
    pub fn insert_reply(&mut self, parent: &CommentId, reply: Comment) {
        match self.comments.iter_mut().find(|c| c.id == *parent) {
            Some(c) => c.replies.push(reply),
            None => tracing::debug!(?parent, reply = ?reply.id, "dropping reply to unknown comment"),
        }
    }

    /// Removes a top-level comment, along with its replies
    ///
    /// Replies themselves are not looked for.
    pub fn remove_comment(&mut self, id: &CommentId) {
        self.comments.retain(|c| c.id != *id);
    }
}

fn failure_notice(err: &Error, fallback: &str) -> Notice {
    Notice::error(err.server_message().unwrap_or_else(|| String::from(fallback)))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use async_trait::async_trait;
    use chrono::Utc;
    use futures::executor::block_on;

    use super::*;
    use crate::{
        api::{self, Author, UserId},
        execute, CommentsApi, NoticeKind,
    };

    fn ada() -> Identity {
        Identity {
            id: UserId(String::from("u-ada")),
            name: String::from("ada"),
            alias: None,
        }
    }

    fn post() -> PostId {
        PostId(String::from("p1"))
    }

    fn comment(id: &str, author: &str, content: &str) -> Comment {
        Comment {
            id: CommentId(String::from(id)),
            post_id: post(),
            author_id: None,
            author: Author {
                name: String::from(author),
                alias: None,
                anonymous_id: None,
            },
            content: String::from(content),
            created_at: Utc::now(),
            parent_comment_id: None,
            replies: Vec::new(),
        }
    }

    fn reply(id: &str, parent: &str, content: &str) -> Comment {
        Comment {
            parent_comment_id: Some(CommentId(String::from(parent))),
            ..comment(id, "bob", content)
        }
    }

    fn ids(comments: &[Comment]) -> Vec<&str> {
        comments.iter().map(|c| &c.id.0 as &str).collect()
    }

    fn loaded(comments: Vec<Comment>) -> Thread {
        let mut t = Thread::new(post(), Some(ada()));
        t.open().expect("empty thread should load");
        t.apply(Response::Loaded(Ok(comments)));
        t
    }

    /// Answers like a server would, and records what it was asked
    #[derive(Default)]
    struct FakeApi {
        calls: RefCell<Vec<Request>>,
        comments: RefCell<Vec<Comment>>,
        offline: RefCell<bool>,
    }

    impl FakeApi {
        fn num_calls(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl CommentsApi for FakeApi {
        async fn fetch_comments(&self, post: &PostId) -> Result<Vec<Comment>, Error> {
            self.calls.borrow_mut().push(Request::Load(post.clone()));
            if *self.offline.borrow() {
                return Err(Error::Network(String::from("connection refused")));
            }
            Ok(self.comments.borrow().clone())
        }

        async fn create_comment(&self, c: &NewComment) -> Result<Comment, Error> {
            self.calls.borrow_mut().push(Request::Create(c.clone()));
            let id = format!("c{}", self.num_calls());
            Ok(Comment {
                parent_comment_id: c.parent_comment_id.clone(),
                ..comment(&id, "ada", &c.content)
            })
        }

        async fn delete_comment(&self, comment: &CommentId, actor: &UserId) -> Result<(), Error> {
            self.calls.borrow_mut().push(Request::Delete {
                comment: comment.clone(),
                actor: actor.clone(),
            });
            Err(Error::Api(api::Error::PermissionDenied))
        }
    }

    fn run(api: &FakeApi, thread: &mut Thread, req: Option<Request>) -> Option<Notice> {
        let req = req?;
        thread.apply(block_on(execute(api, req)))
    }

    #[test]
    fn opening_loads_exactly_once() {
        let api = FakeApi::default();
        api.comments.borrow_mut().push(comment("c0", "bob", "hello"));
        let mut t = Thread::new(post(), Some(ada()));

        let req = t.open();
        assert_eq!(req, Some(Request::Load(post())));
        assert_eq!(t.state(), ThreadState::Loading);
        assert_eq!(t.open(), None, "opening an open thread is not a transition");
        run(&api, &mut t, req);
        assert_eq!(api.num_calls(), 1);

        t.close();
        assert_eq!(t.state(), ThreadState::Closed { count: 1 });
        let req = t.open();
        assert_eq!(req, None);
        assert_eq!(api.num_calls(), 1);
        assert_eq!(ids(t.comments()), vec!["c0"]);
    }

    #[test]
    fn empty_threads_reload_on_reopen() {
        let mut t = loaded(Vec::new());
        t.close();
        assert_eq!(t.open(), Some(Request::Load(post())));
    }

    #[test]
    fn comment_then_reply_scenario() {
        let api = FakeApi::default();
        let mut t = Thread::new(post(), Some(ada()));
        let req = t.open();
        run(&api, &mut t, req);
        assert_eq!(t.state(), ThreadState::Empty);
        assert!(EMPTY_THREAD_MESSAGE.starts_with("No comments yet."));

        t.set_draft(String::from("  first!  "));
        let req = t.submit_comment();
        assert!(matches!(&req, Some(Request::Create(c)) if c.content == "first!"));
        let notice = run(&api, &mut t, req).unwrap();
        assert_eq!(notice, Notice::success("Comment posted!"));
        assert_eq!(t.draft(), "");
        assert_eq!(t.comments().len(), 1);
        assert_eq!(t.comments()[0].content, "first!");
        assert!(t.comments()[0].replies.is_empty());

        let first = t.comments()[0].id.clone();
        t.start_reply(first.clone());
        t.set_reply_draft(String::from("agreed"));
        let req = t.submit_reply(first.clone());
        let notice = run(&api, &mut t, req).unwrap();
        assert_eq!(notice, Notice::success("Reply posted!"));
        assert_eq!(t.replying_to(), None);
        assert_eq!(t.reply_draft(), "");
        assert_eq!(t.comments().len(), 1);
        let replies = &t.comments()[0].replies;
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].content, "agreed");
        assert_eq!(replies[0].parent_comment_id, Some(first));
    }

    #[test]
    fn failed_load_keeps_store_and_retries_on_reopen() {
        let api = FakeApi::default();
        *api.offline.borrow_mut() = true;
        let mut t = Thread::new(post(), Some(ada()));

        let req = t.open();
        let notice = run(&api, &mut t, req).unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.description, "Failed to load comments");
        assert!(t.comments().is_empty());
        assert!(!t.is_loading());

        t.close();
        *api.offline.borrow_mut() = false;
        api.comments.borrow_mut().push(comment("c0", "bob", "back online"));
        let req = t.open();
        run(&api, &mut t, req);
        assert_eq!(api.num_calls(), 2);
        assert_eq!(ids(t.comments()), vec!["c0"]);
    }

    #[test]
    fn blank_or_anonymous_submissions_do_nothing() {
        let mut t = loaded(Vec::new());
        t.set_draft(String::from(" \n\t "));
        assert_eq!(t.submit_comment(), None);
        t.set_reply_draft(String::new());
        assert_eq!(t.submit_reply(CommentId(String::from("c0"))), None);
        assert!(!t.is_submitting());

        let mut t = Thread::new(post(), None);
        t.set_draft(String::from("hello"));
        assert_eq!(t.submit_comment(), None);
        t.set_reply_draft(String::from("hello"));
        assert_eq!(t.submit_reply(CommentId(String::from("c0"))), None);
        assert_eq!(t.delete(CommentId(String::from("c0"))), None);
        assert!(!t.is_submitting());
    }

    #[test]
    fn one_submission_at_a_time() {
        let mut t = loaded(vec![comment("c0", "bob", "hello")]);
        t.set_draft(String::from("one"));
        let first = t.submit_comment();
        assert!(first.is_some());
        assert!(t.is_submitting());
        assert!(!t.can_submit_comment());

        assert_eq!(t.submit_comment(), None);
        t.set_reply_draft(String::from("two"));
        assert_eq!(t.submit_reply(CommentId(String::from("c0"))), None);

        t.apply(Response::Created(Ok(comment("c1", "ada", "one"))));
        assert!(!t.is_submitting());
        assert!(t.submit_reply(CommentId(String::from("c0"))).is_some());
    }

    #[test]
    fn no_submission_while_loading() {
        let mut t = Thread::new(post(), Some(ada()));
        let load = t.open();
        assert!(load.is_some());
        t.set_draft(String::from("too early"));
        t.set_reply_draft(String::from("too early"));
        assert!(!t.can_submit_comment());
        assert!(!t.can_submit_reply());
        assert_eq!(t.submit_comment(), None);
        assert_eq!(t.submit_reply(CommentId(String::from("c0"))), None);
        assert!(!t.is_submitting());

        t.apply(Response::Loaded(Ok(vec![comment("c0", "bob", "old")])));
        assert!(t.can_submit_comment());
        t.submit_comment().unwrap();
        t.apply(Response::Created(Ok(comment("c1", "ada", "too early"))));
        assert_eq!(ids(t.comments()), vec!["c1", "c0"]);
    }

    #[test]
    fn failed_submission_keeps_draft() {
        let mut t = loaded(Vec::new());
        t.set_draft(String::from("hot take"));
        t.submit_comment().unwrap();
        let notice = t
            .apply(Response::Created(Err(Error::Api(api::Error::Unknown(
                String::from("Post has expired"),
            )))))
            .unwrap();
        assert_eq!(notice, Notice::error("Post has expired"));
        assert_eq!(t.draft(), "hot take");
        assert!(!t.is_submitting());
        assert!(t.comments().is_empty());

        t.submit_comment().unwrap();
        let notice = t
            .apply(Response::Created(Err(Error::Network(String::from("timeout")))))
            .unwrap();
        assert_eq!(notice, Notice::error("Failed to post comment"));
    }

    #[test]
    fn failed_reply_keeps_composer_open() {
        let mut t = loaded(vec![comment("c0", "bob", "hello")]);
        let parent = CommentId(String::from("c0"));
        t.start_reply(parent.clone());
        t.set_reply_draft(String::from("nope"));
        t.submit_reply(parent.clone()).unwrap();
        let notice = t.apply(Response::Created(Err(Error::UnknownStatus(502)))).unwrap();
        assert_eq!(notice, Notice::error("Failed to post reply"));
        assert_eq!(t.replying_to(), Some(&parent));
        assert_eq!(t.reply_draft(), "nope");
    }

    #[test]
    fn newest_comment_comes_first() {
        let mut t = loaded(vec![comment("c1", "bob", "b"), comment("c0", "bob", "a")]);
        t.set_draft(String::from("c"));
        t.submit_comment().unwrap();
        t.apply(Response::Created(Ok(comment("c2", "ada", "c"))));
        assert_eq!(ids(t.comments()), vec!["c2", "c1", "c0"]);
    }

    #[test]
    fn replies_append_to_their_parent() {
        let mut parent = comment("c0", "bob", "a");
        parent.replies.push(reply("r0", "c0", "old"));
        let mut t = loaded(vec![comment("c1", "bob", "b"), parent]);

        t.set_reply_draft(String::from("new"));
        t.submit_reply(CommentId(String::from("c0"))).unwrap();
        t.apply(Response::Created(Ok(reply("r1", "c0", "new"))));
        assert_eq!(ids(&t.comments()[1].replies), vec!["r0", "r1"]);
        assert!(t.comments()[0].replies.is_empty());
    }

    #[test]
    fn replies_to_unknown_parents_are_dropped() {
        let mut t = loaded(vec![comment("c0", "bob", "a")]);
        t.set_reply_draft(String::from("lost"));
        t.submit_reply(CommentId(String::from("gone"))).unwrap();
        let notice = t.apply(Response::Created(Ok(reply("r0", "gone", "lost"))));
        assert_eq!(notice, Some(Notice::success("Reply posted!")));
        assert_eq!(ids(t.comments()), vec!["c0"]);
        assert!(t.comments()[0].replies.is_empty());
    }

    #[test]
    fn delete_removes_exactly_one_top_level_comment() {
        let mut with_reply = comment("c1", "ada", "b");
        with_reply.replies.push(reply("r0", "c1", "x"));
        let mut t = loaded(vec![
            comment("c2", "bob", "c"),
            with_reply,
            comment("c0", "ada", "a"),
        ]);

        let req = t.delete(CommentId(String::from("c1")));
        assert_eq!(
            req,
            Some(Request::Delete {
                comment: CommentId(String::from("c1")),
                actor: ada().id,
            })
        );
        let notice = t.apply(Response::Deleted(CommentId(String::from("c1")), Ok(())));
        assert_eq!(notice, Some(Notice::success("Comment deleted")));
        assert_eq!(ids(t.comments()), vec!["c2", "c0"]);

        // replies are not searched
        t.apply(Response::Deleted(CommentId(String::from("r0")), Ok(())));
        assert_eq!(ids(t.comments()), vec!["c2", "c0"]);
    }

    #[test]
    fn failed_delete_keeps_comment() {
        let api = FakeApi::default();
        let mut t = loaded(vec![comment("c0", "ada", "mine")]);
        let req = t.delete(CommentId(String::from("c0")));
        let notice = run(&api, &mut t, req).unwrap();
        assert_eq!(
            notice,
            Notice::error(api::Error::PermissionDenied.message())
        );
        assert_eq!(ids(t.comments()), vec!["c0"]);
    }

    #[test]
    fn delete_is_offered_by_author_name() {
        let t = loaded(Vec::new());
        assert!(t.can_delete(&comment("c0", "ada", "mine")));
        assert!(!t.can_delete(&comment("c1", "bob", "theirs")));

        // aliases do not count, only names
        let mut aliased = comment("c2", "bob", "theirs");
        aliased.author.alias = Some(String::from("ada"));
        assert!(!t.can_delete(&aliased));

        assert!(!Thread::new(post(), None).can_delete(&comment("c0", "ada", "mine")));
    }

    #[test]
    fn reply_composer_toggles() {
        let mut t = loaded(Vec::new());
        let c0 = CommentId(String::from("c0"));
        let c1 = CommentId(String::from("c1"));
        t.start_reply(c0.clone());
        assert_eq!(t.replying_to(), Some(&c0));
        t.start_reply(c1.clone());
        assert_eq!(t.replying_to(), Some(&c1));
        t.start_reply(c1);
        assert_eq!(t.replying_to(), None);

        t.start_reply(c0);
        t.set_reply_draft(String::from("draft"));
        t.cancel_reply();
        assert_eq!(t.replying_to(), None);
        assert_eq!(t.reply_draft(), "");
    }

    #[test]
    fn store_matches_model_under_random_mutations() {
        bolero::check!()
            .with_type::<Vec<(u8, u8)>>()
            .for_each(|ops| {
                let mut t = loaded(Vec::new());
                let mut model: Vec<(String, Vec<String>)> = Vec::new();
                for (i, (op, target)) in ops.iter().enumerate() {
                    let id = format!("c{i}");
                    let target = match model.len() {
                        0 => None,
                        len => Some(model[*target as usize % len].0.clone()),
                    };
                    match (op % 3, target) {
                        (0, _) | (_, None) => {
                            t.set_draft(id.clone());
                            t.submit_comment().unwrap();
                            t.apply(Response::Created(Ok(comment(&id, "ada", &id))));
                            model.insert(0, (id, Vec::new()));
                        }
                        (1, Some(parent)) => {
                            t.set_reply_draft(id.clone());
                            t.submit_reply(CommentId(parent.clone())).unwrap();
                            t.apply(Response::Created(Ok(reply(&id, &parent, &id))));
                            let entry = model.iter_mut().find(|(c, _)| *c == parent).unwrap();
                            entry.1.push(id);
                        }
                        (_, Some(victim)) => {
                            t.apply(Response::Deleted(CommentId(victim.clone()), Ok(())));
                            model.retain(|(c, _)| *c != victim);
                        }
                    }
                    let actual = t
                        .comments()
                        .iter()
                        .map(|c| {
                            let replies = c.replies.iter().map(|r| r.id.0.clone()).collect();
                            (c.id.0.clone(), replies)
                        })
                        .collect::<Vec<(String, Vec<String>)>>();
                    assert_eq!(actual, model);
                    assert!(!t.is_submitting());
                }
            });
    }
}
