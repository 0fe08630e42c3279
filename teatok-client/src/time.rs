use crate::api::Time;

pub fn time_ago(created: Time, now: Time) -> String {
    let secs = (now - created).num_seconds();
    match secs {
        s if s < 60 => String::from("Just now"),
        s if s < 3600 => format!("{}m ago", s / 60),
        s if s < 86400 => format!("{}h ago", s / 3600),
        s => format!("{}d ago", s / 86400),
    }
}
