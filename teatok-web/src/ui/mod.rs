mod app;
pub use app::App;

mod comments_section;
pub use comments_section::CommentsSection;

mod login;
pub use login::Login;

mod new_post_form;
pub use new_post_form::NewPostForm;

mod post_card;
pub use post_card::PostCard;

mod toasts;
pub use toasts::Toasts;
