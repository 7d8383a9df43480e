pub mod mailer;
pub mod resolver;
pub mod upstream;
pub mod waitlist;
