mod daily_digest;
mod helpers;
