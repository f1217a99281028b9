use rand::seq::SliceRandom;

// stand-in replies, {prompt} is replaced verbatim
pub const TEMPLATES: [&str; 5] = [
    "Here is a thought about \"{prompt}\": every good idea starts small and grows with attention.",
    "You asked about \"{prompt}\". The models are resting right now, but the question is a good one to keep exploring.",
    "On \"{prompt}\": consider breaking it into smaller parts and tackling them one at a time.",
    "\"{prompt}\" is an interesting prompt. A full answer will be available once the generation service is back.",
    "Thinking about \"{prompt}\"... sometimes the simplest explanation is the best place to start.",
];

pub fn synthesize(prompt: &str) -> String {
    let template = TEMPLATES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(TEMPLATES[0]);
    render(template, prompt)
}

pub fn render(template: &str, prompt: &str) -> String {
    template.replace("{prompt}", prompt)
}
