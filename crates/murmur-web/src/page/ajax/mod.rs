//! JSON endpoints for the in-page scripts.

mod dismiss_notification;
mod get_likes;
mod get_notifications;
mod like;

pub use dismiss_notification::DismissNotificationAjaxPage;
pub use get_likes::GetLikesAjaxPage;
pub use get_notifications::GetNotificationsAjaxPage;
pub use like::{LikeAjaxPage, UnlikeAjaxPage};
