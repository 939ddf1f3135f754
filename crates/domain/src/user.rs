use crate::shared::entity::{Entity, ID};
use chrono_tz::{Tz, UTC};

/// The notification-relevant projection of a coached user. Account
/// management owns the full profile, the scheduler only reads this.
#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub phone_number: String,
    pub timezone: Tz,
    /// Whole local hour (0-23) at which the user wants their daily
    /// workout message. Sub-hour local granularity is never scheduled,
    /// even in timezones with a non-whole-hour UTC offset.
    pub preferred_send_hour: u32,
    pub active: bool,
}

impl User {
    pub fn new(name: &str, phone_number: &str) -> Self {
        Self {
            id: Default::default(),
            name: name.to_string(),
            phone_number: phone_number.to_string(),
            timezone: UTC,
            preferred_send_hour: 8,
            active: true,
        }
    }

    pub fn set_timezone(&mut self, timezone: &str) -> bool {
        match timezone.parse::<Tz>() {
            Ok(tzid) => {
                self.timezone = tzid;
                true
            }
            Err(_) => false,
        }
    }

    pub fn set_preferred_send_hour(&mut self, hour: u32) -> bool {
        if hour <= 23 {
            self.preferred_send_hour = hour;
            true
        } else {
            false
        }
    }
}

impl Entity<ID> for User {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validates_timezone_updates() {
        let mut user = User::new("Dana", "+15550100");
        assert!(user.set_timezone("Europe/Oslo"));
        assert_eq!(user.timezone, chrono_tz::Europe::Oslo);
        assert!(!user.set_timezone("Europe/NotACity"));
        assert_eq!(user.timezone, chrono_tz::Europe::Oslo);
    }

    #[test]
    fn validates_send_hour_updates() {
        let mut user = User::new("Dana", "+15550100");
        assert!(user.set_preferred_send_hour(0));
        assert!(user.set_preferred_send_hour(23));
        assert!(!user.set_preferred_send_hour(24));
        assert_eq!(user.preferred_send_hour, 23);
    }
}
