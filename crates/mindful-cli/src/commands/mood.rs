use clap::Args;
use mindful_core::{Config, Event, MoodRating, PageKind};

#[derive(Args)]
pub struct MoodArgs {
    /// Ratings to submit in order, each 1-5
    #[arg(required = true)]
    pub ratings: Vec<u8>,
    /// Print events as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: MoodArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let ratings = args
        .ratings
        .iter()
        .map(|r| MoodRating::new(*r))
        .collect::<Result<Vec<_>, _>>()?;

    let mut runtime = super::load_page(PageKind::Product, config);
    let tracker = runtime
        .mood
        .as_mut()
        .ok_or("mood tracker is not available on the product page")?;

    for rating in ratings {
        let Some(event) = tracker.submit_rating(rating) else {
            continue;
        };
        if args.json {
            println!("{}", serde_json::to_string(&event)?);
        } else if let (Event::MoodRecorded { .. }, Some(summary)) =
            (&event, tracker.last_summary())
        {
            println!("{}  [{}]", summary.text(), summary.bar_width());
        }
    }
    Ok(())
}
