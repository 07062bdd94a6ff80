use super::entity::DatePoll;
use crate::domain::vote::find_duplicate_voter;
use crate::domain::{DomainError, DomainResult};

/// Validates a single DatePoll
pub fn validate_date_poll(poll: &DatePoll) -> DomainResult<()> {
    if poll.votes.is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "Date poll for {} has no votes and should have been pruned",
            poll.date
        )));
    }
    if let Some(nickname) = find_duplicate_voter(&poll.votes) {
        return Err(DomainError::InvariantViolation(format!(
            "Nickname {} voted twice for {}",
            nickname, poll.date
        )));
    }
    Ok(())
}

/// Validates the whole poll list: every poll is valid and dates are unique
pub fn validate_date_polls(polls: &[DatePoll]) -> DomainResult<()> {
    for (idx, poll) in polls.iter().enumerate() {
        validate_date_poll(poll)?;
        if polls[..idx].iter().any(|p| p.date == poll.date) {
            return Err(DomainError::InvariantViolation(format!(
                "More than one poll for {}",
                poll.date
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::date_poll::parse_poll_date;

    #[test]
    fn test_valid_poll() {
        let poll = DatePoll::new(parse_poll_date("2025-06-01").unwrap(), "Ken");
        assert!(validate_date_poll(&poll).is_ok());
    }

    #[test]
    fn test_empty_poll_fails() {
        let mut poll = DatePoll::new(parse_poll_date("2025-06-01").unwrap(), "Ken");
        poll.votes.clear();
        assert!(validate_date_poll(&poll).is_err());
    }

    #[test]
    fn test_duplicate_dates_fail() {
        let date = parse_poll_date("2025-06-01").unwrap();
        let polls = vec![DatePoll::new(date, "Ken"), DatePoll::new(date, "Ann")];
        assert!(validate_date_polls(&polls).is_err());
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        assert!(parse_poll_date("2025/06/01").is_err());
        assert!(parse_poll_date("2025-13-01").is_err());
        assert!(parse_poll_date(" 2025-06-01 ").is_ok());
    }
}
