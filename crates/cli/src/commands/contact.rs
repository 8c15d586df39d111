//! Contact request command.

use clap::Args;
use folio_client::{ClientConfig, ContactClient, ContactForm, Feedback};
use folio_core::ContactSubmission;

use super::CommandError;

/// Fields of a contact request.
#[derive(Debug, Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub last_name: String,

    #[arg(short, long)]
    pub email: String,

    #[arg(long, default_value = "")]
    pub company: String,

    /// Kind of project, e.g. `web`, `ml`, `consulting`
    #[arg(long, default_value = "")]
    pub project_type: String,

    #[arg(short, long, default_value = "")]
    pub description: String,

    #[arg(long, default_value = "")]
    pub timeline: String,
}

impl From<ContactArgs> for ContactSubmission {
    fn from(args: ContactArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            company: args.company,
            project_type: args.project_type,
            description: args.description,
            timeline: args.timeline,
        }
    }
}

/// Submit one contact request and print the result.
#[allow(clippy::print_stdout)]
pub async fn send(config: &ClientConfig, args: ContactArgs) -> Result<(), CommandError> {
    let client = ContactClient::new(config)?;
    let mut form = ContactForm::new();
    form.fields = args.into();

    match form.submit(&client).await {
        Some(Feedback::Success) => {
            println!("{}", Feedback::Success.message());
            Ok(())
        }
        Some(feedback) => Err(CommandError::NotSent(feedback.message())),
        None => Ok(()),
    }
}
