use rand::Rng;

/// Shown, one at random, when a meditation finishes.
pub const AFFIRMATIONS: [&str; 6] = [
    "Asking for help is a sign of self-respect and self-awareness.",
    "Changing my mind is a strength, not a weakness.",
    "I alone hold the truth of who I am.",
    "I am allowed to ask for what I want and what I need.",
    "I am allowed to feel good.",
    "I am in charge of how I feel and I choose to feel happy.",
];

/// Uniform pick from [`AFFIRMATIONS`].
pub fn pick_affirmation<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    AFFIRMATIONS[rng.gen_range(0..AFFIRMATIONS.len())]
}
