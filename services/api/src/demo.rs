use crate::infra::{InMemoryPollRepository, InMemoryProviderRepository, InMemoryTicketRepository};
use clap::Args;
use gestao::config::MessagingConfig;
use gestao::error::AppError;
use gestao::presentation::badge_of;
use gestao::workflows::maintenance::{
    MaintenanceService, ProviderSubmission, TicketKind, TicketPriority, TicketSubmission,
};
use gestao::workflows::polls::{PollCategory, PollService, PollSubmission, PollTally, VoteRequest};
use std::sync::Arc;

/// Option each demo voter picks, cycled by voter position.
const BALLOT_PATTERN: [i64; 7] = [0, 1, 0, 2, 0, 1, 2];

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Number of residents casting a ballot in the demo poll
    #[arg(long, default_value_t = 12)]
    pub(crate) voters: usize,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Community management demo");
    run_poll_demo(args.voters)?;
    run_maintenance_demo()?;
    Ok(())
}

fn run_poll_demo(voters: usize) -> Result<(), AppError> {
    let service = PollService::new(Arc::new(InMemoryPollRepository::default()));
    let poll = service.create(PollSubmission {
        title: "Reforma do salão de festas".to_string(),
        description: Some("Qual acabamento devemos contratar?".to_string()),
        category: PollCategory::Purchase,
        options: vec![
            "Piso vinílico".to_string(),
            "Porcelanato".to_string(),
            "Manter o atual".to_string(),
        ],
        creator: Some("Síndico".to_string()),
        multiple_choice: false,
        closes_at: None,
    })?;

    let category = badge_of(poll.category);
    println!(
        "\nPoll '{}' [{} | {}] with {} options",
        poll.title,
        category.label,
        category.classes,
        poll.options.len()
    );

    for (position, option_index) in BALLOT_PATTERN.iter().cycle().take(voters).enumerate() {
        service.vote(
            &poll.id,
            VoteRequest {
                option_index: *option_index,
                voter: format!("Apto {:03}", 101 + position),
            },
        )?;
    }

    if voters > 0 {
        let repeat = service.vote(
            &poll.id,
            VoteRequest {
                option_index: 1,
                voter: "Apto 101".to_string(),
            },
        );
        if let Err(err) = repeat {
            println!("- Second ballot from Apto 101 rejected: {}", err);
        }
    }

    let closed = service.close(&poll.id)?;
    let status = badge_of(closed.status);
    println!("- Poll status: {} ({})", status.label, status.classes);

    let late = service.vote(
        &poll.id,
        VoteRequest {
            option_index: 0,
            voter: "Apto 999".to_string(),
        },
    );
    if let Err(err) = late {
        println!("- Late ballot rejected: {}", err);
    }

    render_tally(&service.tally(&poll.id)?);
    Ok(())
}

fn render_tally(tally: &PollTally) {
    println!("Results ({} votes)", tally.total_votos);
    for option in &tally.options {
        let marker = if option.leading { " <- winner" } else { "" };
        println!(
            "  - {}: {} votes ({}%){}",
            option.label, option.votes, option.percentage, marker
        );
    }
    if tally.winner.is_none() {
        println!("  No single winner (tie or no votes)");
    }
}

fn run_maintenance_demo() -> Result<(), AppError> {
    let service = MaintenanceService::new(
        Arc::new(InMemoryTicketRepository::default()),
        Arc::new(InMemoryProviderRepository::default()),
        MessagingConfig::default(),
    );

    let provider = service.create_provider(ProviderSubmission {
        name: "Carlos Eletricista".to_string(),
        phone: "(11) 98765-4321".to_string(),
        specialty: Some("Elétrica".to_string()),
        company: None,
        notes: None,
        active: true,
    })?;
    println!("\nProvider registered: {} ({})", provider.name, provider.phone);

    let created = service.create_ticket(TicketSubmission {
        structure: "Iluminação da garagem".to_string(),
        area: Some("Subsolo".to_string()),
        description: "Três lâmpadas queimadas próximas à rampa".to_string(),
        priority: TicketPriority::High,
        kind: TicketKind::Corrective,
        provider_id: Some(provider.id.clone()),
        requester: Some("Portaria".to_string()),
    })?;
    let ticket = created.ticket;
    let priority = badge_of(ticket.priority);
    println!(
        "Ticket #{:03} opened: {} [{} | {}]",
        ticket.number, ticket.structure, priority.label, priority.classes
    );

    match created.preview {
        Some(preview) => {
            println!("Notification preview:\n{}", preview.message);
            println!("WhatsApp link: {}", preview.whatsapp_url);
        }
        None => println!("No notification available for this provider"),
    }

    let started = service.start_ticket(&ticket.id)?;
    println!("- Status: {}", badge_of(started.status).label);
    let resolved = service.resolve_ticket(
        &ticket.id,
        Some("Lâmpadas substituídas por LED".to_string()),
    )?;
    println!(
        "- Status: {} ({})",
        badge_of(resolved.status).label,
        resolved.resolution.as_deref().unwrap_or("sem observação")
    );

    if let Err(err) = service.start_ticket(&ticket.id) {
        println!("- Restart rejected: {}", err);
    }

    Ok(())
}
