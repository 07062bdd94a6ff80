// src/services/date_poll_service.rs
//
// Date availability poll

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{info, warn};

use crate::domain::{
    parse_poll_date, rank_polls, repair_polls, toggle_date_vote, validate_date_polls, DatePoll,
    DateVoteOutcome, Session,
};
use crate::error::{AppError, AppResult};
use crate::events::{DateVoteToggled, EventBus};
use crate::repositories::DatePollRepository;
use crate::services::require_session;

pub struct DatePollService {
    date_poll_repo: Arc<dyn DatePollRepository>,
    event_bus: Arc<EventBus>,
    polls: Mutex<Vec<DatePoll>>,
}

impl DatePollService {
    pub fn new(date_poll_repo: Arc<dyn DatePollRepository>, event_bus: Arc<EventBus>) -> Self {
        // An undecodable record has already been copied aside by the repository
        let polls = date_poll_repo.load().unwrap_or_else(|e| {
            warn!("Stored date polls could not be read, starting empty: {}", e);
            Vec::new()
        });

        // A hand-edited store could hold two polls for one day
        let polls = match validate_date_polls(&polls) {
            Ok(()) => polls,
            Err(e) => {
                warn!("Stored date polls are inconsistent, repairing: {}", e);
                repair_polls(polls)
            }
        };
        info!("Loaded {} date polls", polls.len());

        Self {
            date_poll_repo,
            event_bus,
            polls: Mutex::new(polls),
        }
    }

    fn ledger(&self) -> MutexGuard<'_, Vec<DatePoll>> {
        self.polls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Toggle the session's availability on a `YYYY-MM-DD` date
    pub fn toggle_date_vote(
        &self,
        session: Option<&Session>,
        raw_date: &str,
    ) -> AppResult<DateVoteOutcome> {
        let session = require_session(session)?;
        let date = parse_poll_date(raw_date).map_err(|e| AppError::Validation(e.to_string()))?;

        let outcome = {
            let mut polls = self.ledger();
            let outcome = toggle_date_vote(&mut polls, date, session.nickname());
            if let Err(e) = self.date_poll_repo.save(&polls) {
                warn!("Failed to persist date polls: {}", e);
            }
            outcome
        };

        info!("{} on {}: {}", session, date, outcome.as_str());
        self.event_bus.emit(DateVoteToggled::new(
            date,
            session.nickname().to_string(),
            outcome,
        ));

        Ok(outcome)
    }

    /// Polls in storage order
    pub fn list_polls(&self) -> Vec<DatePoll> {
        self.ledger().clone()
    }

    /// Polls ordered for display: most votes first, earlier date on ties
    pub fn list_ranked(&self) -> Vec<DatePoll> {
        rank_polls(&self.ledger())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, get_connection, initialize_database};
    use crate::repositories::record_store::{self, DATE_POLL_LIST};
    use crate::repositories::{MockDatePollRepository, SqliteDatePollRepository};

    fn service() -> (DatePollService, Arc<SqliteDatePollRepository>) {
        let pool = create_memory_pool().unwrap();
        initialize_database(&get_connection(&pool).unwrap()).unwrap();
        let repo = Arc::new(SqliteDatePollRepository::new(Arc::new(pool)));
        (DatePollService::new(repo.clone(), Arc::new(EventBus::new())), repo)
    }

    #[test]
    fn test_create_then_prune() {
        let (service, repo) = service();
        let ken = Session::new("Ken").unwrap();

        let created = service.toggle_date_vote(Some(&ken), "2025-06-01").unwrap();
        assert!(matches!(created, DateVoteOutcome::Created { .. }));
        let stored = repo.load().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].votes, vec!["Ken".to_string()]);

        let pruned = service.toggle_date_vote(Some(&ken), "2025-06-01").unwrap();
        assert_eq!(pruned, DateVoteOutcome::Pruned { poll_id: created.poll_id() });
        assert!(service.list_polls().is_empty());
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_requires_session_and_valid_date() {
        let (service, _) = service();
        let ken = Session::new("Ken").unwrap();

        assert!(matches!(
            service.toggle_date_vote(None, "2025-06-01"),
            Err(AppError::SessionRequired)
        ));
        assert!(matches!(
            service.toggle_date_vote(Some(&ken), "June 1st"),
            Err(AppError::Validation(_))
        ));
        assert!(service.list_polls().is_empty());
    }

    #[test]
    fn test_ranked_listing() {
        let (service, _) = service();
        let ken = Session::new("Ken").unwrap();
        let mia = Session::new("Mia").unwrap();

        service.toggle_date_vote(Some(&ken), "2025-06-08").unwrap();
        service.toggle_date_vote(Some(&ken), "2025-06-01").unwrap();
        service.toggle_date_vote(Some(&mia), "2025-06-08").unwrap();
        service.toggle_date_vote(Some(&mia), "2025-05-30").unwrap();

        let dates: Vec<String> = service
            .list_ranked()
            .iter()
            .map(|p| p.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2025-06-08", "2025-05-30", "2025-06-01"]);
    }

    #[test]
    fn test_save_failure_keeps_the_vote() {
        let mut repo = MockDatePollRepository::new();
        repo.expect_load().returning(|| Ok(Vec::new()));
        repo.expect_save()
            .times(1)
            .returning(|_| Err(AppError::Other("disk full".to_string())));

        let service = DatePollService::new(Arc::new(repo), Arc::new(EventBus::new()));
        let ken = Session::new("Ken").unwrap();
        service.toggle_date_vote(Some(&ken), "2025-06-01").unwrap();

        assert_eq!(service.list_polls().len(), 1);
    }

    #[test]
    fn test_duplicate_stored_dates_are_merged_not_dropped() {
        let pool = Arc::new(create_memory_pool().unwrap());
        initialize_database(&get_connection(&pool).unwrap()).unwrap();
        let repo = Arc::new(SqliteDatePollRepository::new(pool));

        let june = parse_poll_date("2025-06-01").unwrap();
        let mut july = DatePoll::new(parse_poll_date("2025-07-01").unwrap(), "Ann");
        july.votes.extend(["Bob".to_string(), "Cy".to_string()]);
        repo.save(&[DatePoll::new(june, "Ken"), DatePoll::new(june, "Mia"), july.clone()])
            .unwrap();

        let service = DatePollService::new(repo.clone(), Arc::new(EventBus::new()));
        let zed = Session::new("Zed").unwrap();
        service.toggle_date_vote(Some(&zed), "2025-08-01").unwrap();

        let stored = repo.load().unwrap();
        let summary: Vec<(String, Vec<String>)> = stored
            .iter()
            .map(|p| (p.date.to_string(), p.votes.clone()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("2025-06-01".to_string(), vec!["Ken".to_string(), "Mia".to_string()]),
                ("2025-07-01".to_string(), july.votes),
                ("2025-08-01".to_string(), vec!["Zed".to_string()]),
            ]
        );
    }

    #[test]
    fn test_unreadable_store_is_backed_up_before_first_save() {
        let pool = Arc::new(create_memory_pool().unwrap());
        {
            let conn = get_connection(&pool).unwrap();
            initialize_database(&conn).unwrap();
            record_store::write_record(&conn, DATE_POLL_LIST, "[{\"date\":").unwrap();
        }
        let repo = Arc::new(SqliteDatePollRepository::new(pool.clone()));

        let service = DatePollService::new(repo, Arc::new(EventBus::new()));
        assert!(service.list_polls().is_empty());
        let ken = Session::new("Ken").unwrap();
        service.toggle_date_vote(Some(&ken), "2025-06-01").unwrap();

        let conn = get_connection(&pool).unwrap();
        let backup = record_store::read_record(&conn, &record_store::backup_key(DATE_POLL_LIST))
            .unwrap();
        assert_eq!(backup.as_deref(), Some("[{\"date\":"));
    }
}
