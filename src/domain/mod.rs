mod email_address;
mod notification;
mod recipient_name;

pub use email_address::EmailAddress;
pub use notification::{HadithExcerpt, Notification, Recipient};
pub use recipient_name::RecipientName;
