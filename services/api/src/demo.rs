use crate::infra::InMemoryComplaintRepository;
use async_trait::async_trait;
use clap::Args;
use complaint_desk::complaints::{
    ComplaintDraft, ComplaintFilter, ComplaintService, ComplaintServiceError, Submitter,
};
use complaint_desk::credentials::hash_password;
use complaint_desk::error::AppError;
use complaint_desk::mail::{MailError, MailMessage, MailNotifier, MailTransport};
use std::io::BufRead;
use std::sync::{Arc, Mutex};

const DEMO_SENDER: &str = "complaints@demo.com";
const DEMO_ADMIN: &str = "admin@demo.com";

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Title of the demo complaint
    #[arg(long, default_value = "Order arrived damaged")]
    pub(crate) title: String,
    /// Category of the demo complaint (Product, Service, Support)
    #[arg(long, default_value = "Product")]
    pub(crate) category: String,
    /// Priority of the demo complaint (Low, Medium, High)
    #[arg(long, default_value = "High")]
    pub(crate) priority: String,
    /// Status the reviewer moves the complaint to
    #[arg(long, default_value = "Resolved")]
    pub(crate) status: String,
    /// Keep the complaint instead of deleting it at the end
    #[arg(long)]
    pub(crate) keep: bool,
}

#[derive(Args, Debug)]
pub(crate) struct HashPasswordArgs {
    /// Password to hash. Read from the first line of stdin when omitted.
    pub(crate) password: Option<String>,
}

/// Transport that keeps messages for printing at the end of the demo.
#[derive(Default)]
struct DemoOutbox {
    sent: Mutex<Vec<MailMessage>>,
}

impl DemoOutbox {
    fn messages(&self) -> Vec<MailMessage> {
        self.sent
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MailTransport for DemoOutbox {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        self.sent
            .lock()
            .map_err(|_| MailError::Transport("demo outbox poisoned".to_string()))?
            .push(message.clone());
        Ok(())
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        title,
        category,
        priority,
        status,
        keep,
    } = args;

    let outbox = Arc::new(DemoOutbox::default());
    let notifier = MailNotifier::new(outbox.clone(), DEMO_SENDER, DEMO_ADMIN);
    let service = ComplaintService::new(
        Arc::new(InMemoryComplaintRepository::default()),
        Arc::new(notifier),
    );

    println!("Complaint lifecycle demo");
    let draft = ComplaintDraft::new(
        title,
        "The box was crushed and the item inside is cracked.",
        category,
        priority,
    );
    let submitter = Submitter {
        id: Some("demo-user".to_string()),
        name: Some("Demo User".to_string()),
        email: Some("user@demo.com".to_string()),
    };
    let complaint = match service.submit(draft, submitter).await {
        Ok(complaint) => complaint,
        Err(ComplaintServiceError::Validation(err)) => {
            println!("  Submission rejected: {err}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    println!(
        "- Submitted complaint {} -> status {} ({} / {})",
        complaint.id,
        complaint.status,
        complaint.category.label(),
        complaint.priority.label()
    );

    let updated = match service.update_status(&complaint.id, &status).await {
        Ok(updated) => updated,
        Err(ComplaintServiceError::Validation(err)) => {
            println!("  Status update rejected: {err}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    println!("- Reviewer moved complaint to {}", updated.status);

    let listed = service.list(&ComplaintFilter::default()).await?;
    println!("- Admin list shows {} complaint(s)", listed.len());
    match serde_json::to_string_pretty(&updated) {
        Ok(json) => println!("  Complaint payload:\n{json}"),
        Err(err) => println!("  Complaint payload unavailable: {err}"),
    }

    if !keep {
        service.delete(&complaint.id).await?;
        println!("- Deleted complaint {}", complaint.id);
    }

    let messages = outbox.messages();
    if messages.is_empty() {
        println!("  Outbound e-mails: none dispatched");
    } else {
        println!("  Outbound e-mails:");
        for message in messages {
            println!("    - to={} subject={}", message.to, message.subject);
        }
    }

    Ok(())
}

pub(crate) fn run_hash_password(args: HashPasswordArgs) -> Result<(), AppError> {
    let password = match args.password {
        Some(password) => password,
        None => {
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let secret = hash_password(&password)?;
    println!("{}", secret.expose());
    Ok(())
}
