//! Scripted demonstration of the event management domain.
//!
//! Drives a [`Registry`] through registration, authentication, event
//! creation, enrollment against a small capacity, cancellation and a final
//! report. All narration goes through `tracing`.

pub mod config;

use chrono::{TimeZone, Utc};
use domain::{
    Administrator, Attendee, DomainError, IdentityId, Money, NewEvent, Organizer, Registry,
    Report, Ticket, Venue,
};

use config::Config;

const ADMIN: IdentityId = IdentityId::new(1);
const VERIFIED_ORGANIZER: IdentityId = IdentityId::new(2);
const UNVERIFIED_ORGANIZER: IdentityId = IdentityId::new(3);
const ANA: IdentityId = IdentityId::new(4);
const BRUNO: IdentityId = IdentityId::new(5);
const CARLOS: IdentityId = IdentityId::new(6);

/// What a demo run leaves behind.
#[derive(Debug)]
pub struct DemoRun {
    pub registry: Registry,
    pub report: Report,

    /// Business-rule rejections the script ran into, in order.
    pub rejections: Vec<DomainError>,
}

/// Runs the scripted scenario.
///
/// Rejections the script expects (an unverified organizer, a full event) are
/// collected in [`DemoRun::rejections`]; any other failure aborts the run.
pub fn run(config: &Config) -> domain::Result<DemoRun> {
    let mut registry = Registry::new();
    let mut rejections = Vec::new();

    tracing::info!("registering actors");
    registry.register_identity(Administrator::new(
        ADMIN,
        "Admin Geral",
        "admin@sistema.com",
        "123",
    ))?;
    registry.register_identity(Organizer::new(
        VERIFIED_ORGANIZER,
        "IFC Eventos",
        "contato@ifc.com",
        "abc",
        true,
    ))?;
    registry.register_identity(Organizer::new(
        UNVERIFIED_ORGANIZER,
        "João da Silva",
        "joao@gmail.com",
        "xyz",
        false,
    ))?;
    registry.register_identity(Attendee::new(
        ANA,
        "Ana Souza",
        "ana@mail.com",
        "456",
        "111.222.333-44",
    ))?;
    registry.register_identity(Attendee::new(
        BRUNO,
        "Bruno Costa",
        "bruno@mail.com",
        "789",
        "555.666.777-88",
    ))?;

    tracing::info!("testing authentication");
    for (identity, password) in [
        (ADMIN, "123"),
        (VERIFIED_ORGANIZER, "abc"),
        (UNVERIFIED_ORGANIZER, "xyz"),
        (ANA, "senha_errada"),
    ] {
        let accepted = registry.authenticate(identity, password)?;
        tracing::info!(%identity, accepted, "authentication result");
    }

    tracing::info!("creating events");
    let now = Utc::now();
    let ghost = NewEvent::new("Evento Fantasma", now, now, 100, Venue::new(100, "Nenhum", "N/A", 0))
        .with_description("...");
    if let Err(err) = registry.create_event(UNVERIFIED_ORGANIZER, ghost) {
        expect_rejection(&mut rejections, err)?;
    }

    let lecture = NewEvent::new(
        "Palestra de POO",
        Utc.with_ymd_and_hms(2025, 11, 20, 19, 0, 0)
            .single()
            .unwrap_or(now),
        Utc.with_ymd_and_hms(2025, 11, 20, 22, 0, 0)
            .single()
            .unwrap_or(now),
        config.event_capacity,
        Venue::new(101, "Auditório IFC", "Rod. SC-150, Km 125", 200),
    )
    .with_description("Discussão sobre UML e Python");
    let event = registry.create_event(VERIFIED_ORGANIZER, lecture)?;
    tracing::info!(details = %event, "event created");
    let event = event.id();

    tracing::info!("enrolling attendees");
    let ana_ticket = enroll(&mut registry, &mut rejections, ANA, event, "Estudante", 10)?;
    enroll(&mut registry, &mut rejections, BRUNO, event, "Geral", 20)?;
    registry.register_identity(Attendee::new(
        CARLOS,
        "Carlos",
        "carlos@mail.com",
        "000",
        "999...",
    ))?;
    enroll(&mut registry, &mut rejections, CARLOS, event, "Geral", 20)?;

    if let Some(state) = registry.event(event) {
        tracing::info!(details = %state, "event after enrollments");
    }

    tracing::info!("cancelling an enrollment");
    if let Some(ticket) = ana_ticket {
        registry.cancel_enrollment(ANA, ticket)?;
    }
    if let Some(ana) = registry.attendee(ANA) {
        tracing::info!(held = ana.tickets().len(), "tickets held by Ana");
    }
    if let Some(state) = registry.event(event) {
        for ticket in state.tickets() {
            tracing::info!(
                ticket = %ticket.id(),
                attendee = %ticket.attendee(),
                status = %ticket.status(),
                "event ticket"
            );
        }
    }

    tracing::info!("generating report");
    let report = registry.generate_report(ADMIN)?;

    Ok(DemoRun {
        registry,
        report,
        rejections,
    })
}

fn enroll(
    registry: &mut Registry,
    rejections: &mut Vec<DomainError>,
    attendee: IdentityId,
    event: domain::EventId,
    ticket_type: &str,
    price: i64,
) -> domain::Result<Option<domain::TicketId>> {
    match registry
        .enroll(attendee, event, ticket_type, Money::from_units(price))
        .map(Ticket::id)
    {
        Ok(ticket) => {
            tracing::info!(%attendee, %ticket, "enrollment succeeded");
            Ok(Some(ticket))
        }
        Err(err) => {
            expect_rejection(rejections, err)?;
            Ok(None)
        }
    }
}

/// Keeps business-rule rejections the script anticipates, propagates the rest.
fn expect_rejection(rejections: &mut Vec<DomainError>, err: DomainError) -> domain::Result<()> {
    match err {
        DomainError::NotAuthorized { .. } | DomainError::CapacityExceeded { .. } => {
            tracing::warn!(error = %err, "operation rejected");
            rejections.push(err);
            Ok(())
        }
        other => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use domain::{Account, TicketStatus};

    use super::*;

    #[test]
    fn test_default_run_matches_script() {
        let run = run(&Config::default()).unwrap();

        assert!(matches!(
            run.rejections.as_slice(),
            [
                DomainError::NotAuthorized { .. },
                DomainError::CapacityExceeded { capacity: 2, .. }
            ]
        ));

        let event = run.registry.event_by_name("Palestra de POO").unwrap();
        let statuses: Vec<_> = event
            .tickets()
            .iter()
            .map(|t| (t.attendee(), t.status()))
            .collect();
        assert_eq!(
            statuses,
            vec![(ANA, TicketStatus::Cancelled), (BRUNO, TicketStatus::Sold)]
        );
        assert!(run.registry.attendee(ANA).unwrap().tickets().is_empty());

        assert_eq!(run.registry.identities().len(), 6);
        for identity in run.registry.identities() {
            assert!(run.report.content().contains(identity.name()));
        }
        assert!(run.report.content().contains("- Palestra de POO (1/2 tickets"));
    }

    #[test]
    fn test_larger_capacity_admits_everyone() {
        let config = Config {
            event_capacity: 3,
            ..Config::default()
        };
        let run = run(&config).unwrap();

        assert_eq!(run.rejections.len(), 1);
        let event = run.registry.event_by_name("Palestra de POO").unwrap();
        assert_eq!(event.sold_count(), 2);
        assert_eq!(event.tickets().len(), 3);
    }

    #[test]
    fn test_zero_capacity_aborts() {
        let config = Config {
            event_capacity: 0,
            ..Config::default()
        };
        assert!(matches!(
            run(&config),
            Err(DomainError::InvalidCapacity { .. })
        ));
    }
}
