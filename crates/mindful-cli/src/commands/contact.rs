use clap::Args;
use mindful_core::{Config, ContactFormInput, CoreError, PageKind};

#[derive(Args)]
pub struct ContactArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub department: String,
    #[arg(long, default_value = "")]
    pub subject: String,
    #[arg(long, default_value = "")]
    pub message: String,
    /// Accept the privacy notice
    #[arg(long)]
    pub consent: bool,
}

pub fn run(args: ContactArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut runtime = super::load_page(PageKind::Contact, config);
    let form = runtime
        .contact
        .as_mut()
        .ok_or("contact form is not available on the contact page")?;

    form.fill(ContactFormInput {
        name: args.name,
        email: args.email,
        department: args.department,
        subject: args.subject,
        message: args.message,
        consent: args.consent,
    });

    if let Err(err) = form.submit() {
        if let mindful_core::ValidationError::IncompleteForm { missing } = &err {
            let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
            eprintln!("missing: {}", names.join(", "));
        }
        return Err(CoreError::from(err).into());
    }

    if let Some(status) = form.status() {
        println!("{status}");
    }
    Ok(())
}
