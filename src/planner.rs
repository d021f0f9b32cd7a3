// Scripted trip planner chat: canned questions, then a templated itinerary
use crate::config::BookingConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub const GREETING: &str = "Hi! I'm your AI Travel Assistant 🌍 I'll help you plan the perfect trip based on your preferences. Let's start with a few questions!";
pub const DESTINATION_PROMPT: &str = "Where would you like to go?";
pub const SELECT_INTEREST_PROMPT: &str = "Please select at least one interest before continuing.";
pub const GENERATING_PROMPT: &str =
    "Perfect! I have all the information I need. Let me create your personalized itinerary... 🎨";

pub const QUICK_QUESTIONS: [&str; 6] = [
    "Plan a trip to Bali",
    "Weekend getaway near me",
    "Romantic honeymoon",
    "Adventure trip ideas",
    "Family vacation",
    "Budget backpacking",
];

pub const DONE_OPTION: &str = "✅ Done - Generate Itinerary";

// The eight interests followed by the done chip
static INTEREST_OPTIONS: [&str; 9] = [
    "🏖️ Beach & Relaxation",
    "🏔️ Adventure & Hiking",
    "🏛️ Culture & History",
    "🍜 Food & Cuisine",
    "📸 Photography",
    "🛍️ Shopping",
    "🎨 Art & Museums",
    "🌃 Nightlife",
    DONE_OPTION,
];

pub fn interests() -> &'static [&'static str] {
    &INTEREST_OPTIONS[..8]
}

const MAX_PLAN_DAYS: u32 = 7;
const DEFAULT_PLAN_DAYS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlannerStep {
    Destination,
    Duration,
    Budget,
    Travelers,
    Interests,
    Generating,
    Complete,
}

impl fmt::Display for PlannerStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A bot prompt asked on entering a step, with its quick-reply chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLine {
    pub step: PlannerStep,
    pub prompt: &'static str,
    pub options: &'static [&'static str],
}

pub static SCRIPT: [ScriptLine; 4] = [
    ScriptLine {
        step: PlannerStep::Duration,
        prompt: "Great choice! 🎉 How long would you like to stay?",
        options: &["3-4 days", "5-7 days", "1 week", "10-14 days"],
    },
    ScriptLine {
        step: PlannerStep::Budget,
        prompt: "Perfect! What's your budget range for this trip?",
        options: &[
            "Budget (₹20k-40k)",
            "Mid-range (₹40k-80k)",
            "Luxury (₹80k+)",
            "Ultra Luxury (₹150k+)",
        ],
    },
    ScriptLine {
        step: PlannerStep::Travelers,
        prompt: "Got it! Who will be traveling?",
        options: &["Solo", "Couple", "Family (3-4)", "Group of Friends", "Family (5+)"],
    },
    ScriptLine {
        step: PlannerStep::Interests,
        prompt: "Awesome! 🌟 What are your main interests? (Select multiple, then click Done)",
        options: &INTEREST_OPTIONS,
    },
];

pub fn script_for(step: PlannerStep) -> Option<&'static ScriptLine> {
    SCRIPT.iter().find(|line| line.step == step)
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlannerError {
    #[error("The itinerary is already complete; start a new conversation")]
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sender {
    User,
    Bot,
    // a chip the user tapped
    QuickReply,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl ChatMessage {
    fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            options: Vec::new(),
        }
    }

    fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|o| o.to_string()).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct TripPreferences {
    pub destination: Option<String>,
    pub duration: Option<String>,
    pub budget: Option<String>,
    pub travelers: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl TripPreferences {
    fn has_interest(&self, keyword: &str) -> bool {
        self.interests.iter().any(|i| i.contains(keyword))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Activity {
    pub time: String,
    pub title: String,
    pub description: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlanDay {
    pub day: u32,
    pub title: String,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TripPlan {
    pub preferences: TripPreferences,
    // what the duration answer asked for; `days` never holds more than a week
    pub requested_days: u32,
    pub days: Vec<PlanDay>,
}

impl TripPlan {
    pub fn destination(&self) -> &str {
        self.preferences.destination.as_deref().unwrap_or("Your Destination")
    }
}

type ActivityTemplate = [(&'static str, &'static str, &'static str, &'static str); 4];

const ARRIVAL_DAY: ActivityTemplate = [
    ("10:00 AM", "Airport Pickup & Hotel Check-in", "Private transfer to your hotel. Rest and freshen up.", "2 hours"),
    ("1:00 PM", "Welcome Lunch", "Try authentic local cuisine at a recommended restaurant.", "1.5 hours"),
    ("3:00 PM", "City Orientation Walk", "Explore nearby markets and get your bearings.", "2 hours"),
    ("7:00 PM", "Sunset View & Dinner", "Watch the sunset from a scenic viewpoint.", "2 hours"),
];

const BEACH_DAY: ActivityTemplate = [
    ("8:00 AM", "Beach Morning", "Relax on pristine beaches, swimming and sunbathing.", "3 hours"),
    ("12:00 PM", "Beachside Lunch", "Fresh seafood and tropical drinks by the shore.", "1 hour"),
    ("2:00 PM", "Water Sports Adventure", "Snorkeling, kayaking, or paddleboarding.", "2 hours"),
    ("6:00 PM", "Beach Sunset & Bonfire", "Watch the sunset and enjoy a beach bonfire.", "2 hours"),
];

const CULTURE_DAY: ActivityTemplate = [
    ("9:00 AM", "Temple & Heritage Tour", "Visit ancient temples and historical landmarks.", "3 hours"),
    ("1:00 PM", "Traditional Cooking Class", "Learn to cook authentic local dishes.", "2 hours"),
    ("4:00 PM", "Local Market Shopping", "Browse handicrafts and souvenirs.", "2 hours"),
    ("7:00 PM", "Cultural Dance Performance", "Traditional music and dance show with dinner.", "2 hours"),
];

const ADVENTURE_DAY: ActivityTemplate = [
    ("6:00 AM", "Mountain Sunrise Trek", "Hike to a scenic viewpoint for sunrise.", "4 hours"),
    ("11:00 AM", "Adventure Lunch", "Picnic lunch with panoramic views.", "1 hour"),
    ("1:00 PM", "Zip-lining & Rafting", "Thrilling adventure activities in nature.", "3 hours"),
    ("6:00 PM", "Relaxation & Spa", "Unwind with a traditional massage.", "2 hours"),
];

const DEFAULT_DAY: ActivityTemplate = [
    ("9:00 AM", "Morning Exploration", "Discover hidden gems and local favorites.", "3 hours"),
    ("12:30 PM", "Lunch Break", "Enjoy local specialties at a popular restaurant.", "1.5 hours"),
    ("2:30 PM", "Afternoon Activities", "Continue exploring based on your interests.", "3 hours"),
    ("7:00 PM", "Evening Leisure", "Dinner and free time to relax.", "2 hours"),
];

fn day_title(day: u32, destination: &str) -> String {
    match day {
        1 => format!("Arrival & {} Welcome", destination),
        2 => "Exploring the City".to_string(),
        3 => "Cultural Immersion".to_string(),
        4 => "Adventure Day".to_string(),
        5 => "Hidden Gems Tour".to_string(),
        6 => "Relaxation & Beach Time".to_string(),
        7 => "Departure & Farewell".to_string(),
        _ => format!("Exploring {}", destination),
    }
}

fn day_activities(day: u32, preferences: &TripPreferences) -> Vec<Activity> {
    let template = match day {
        1 => &ARRIVAL_DAY,
        2 if preferences.has_interest("Beach") => &BEACH_DAY,
        3 if preferences.has_interest("Culture") => &CULTURE_DAY,
        4 if preferences.has_interest("Adventure") => &ADVENTURE_DAY,
        _ => &DEFAULT_DAY,
    };
    template
        .iter()
        .map(|(time, title, description, duration)| Activity {
            time: time.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            duration: duration.to_string(),
        })
        .collect()
}

/// Days asked for by a duration answer: the number it starts with, so
/// "10-14 days" asks for ten and "1 week" for one. Anything else, zero
/// included, asks for five.
pub fn requested_days(duration: &str) -> u32 {
    let digits: String = duration
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits
        .parse()
        .ok()
        .filter(|days| *days > 0)
        .unwrap_or(DEFAULT_PLAN_DAYS)
}

pub fn build_plan(preferences: &TripPreferences) -> TripPlan {
    let requested = preferences
        .duration
        .as_deref()
        .map(requested_days)
        .unwrap_or(DEFAULT_PLAN_DAYS);
    let destination = preferences.destination.as_deref().unwrap_or("Your Destination");

    let days = (1..=requested.clamp(1, MAX_PLAN_DAYS))
        .map(|day| PlanDay {
            day,
            title: format!("Day {} - {}", day, day_title(day, destination)),
            activities: day_activities(day, preferences),
        })
        .collect();

    TripPlan {
        preferences: preferences.clone(),
        requested_days: requested,
        days,
    }
}

// Destination chips read as phrases; keep just the place
fn destination_from_chip(option: &str) -> String {
    option.replace("Plan a trip to ", "").replace("near me", "India")
}

/// The planner conversation. Every bot reply is canned: answers are stored
/// verbatim and only steer which template the itinerary uses.
pub struct TripPlanner {
    step: PlannerStep,
    preferences: TripPreferences,
    transcript: Vec<ChatMessage>,
    plan: Option<TripPlan>,
    typing_latency: Duration,
    itinerary_latency: Duration,
}

impl TripPlanner {
    pub fn new(config: &BookingConfig) -> Self {
        Self {
            step: PlannerStep::Destination,
            preferences: TripPreferences::default(),
            transcript: Vec::new(),
            plan: None,
            typing_latency: config.typing_latency(),
            itinerary_latency: config.itinerary_latency(),
        }
    }

    pub fn step(&self) -> PlannerStep {
        self.step
    }

    pub fn preferences(&self) -> &TripPreferences {
        &self.preferences
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn plan(&self) -> Option<&TripPlan> {
        self.plan.as_ref()
    }

    /// Opens (or restarts) the conversation with the greeting and the
    /// destination question.
    pub fn start(&mut self) -> Vec<ChatMessage> {
        self.step = PlannerStep::Destination;
        self.preferences = TripPreferences::default();
        self.plan = None;
        self.transcript.clear();

        let greeting = vec![
            ChatMessage::bot(GREETING),
            ChatMessage::bot(DESTINATION_PROMPT).with_options(&QUICK_QUESTIONS),
        ];
        self.transcript.extend(greeting.iter().cloned());
        greeting
    }

    /// Typed answer. Blank input is ignored, and so is typing during the
    /// interests step, which only reacts to chips.
    pub async fn answer(&mut self, text: &str) -> Result<Vec<ChatMessage>, PlannerError> {
        self.ensure_open()?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut replies = vec![self.record(Sender::User, text)];
        self.typing().await;
        if self.step != PlannerStep::Interests {
            replies.extend(self.store_answer(text.to_string()));
        }
        Ok(replies)
    }

    /// A tapped quick-reply chip.
    pub async fn quick_reply(&mut self, option: &str) -> Result<Vec<ChatMessage>, PlannerError> {
        self.ensure_open()?;

        let mut replies = vec![self.record(Sender::QuickReply, option)];
        self.typing().await;

        match self.step {
            PlannerStep::Destination => {
                replies.extend(self.store_answer(destination_from_chip(option)));
            }
            PlannerStep::Interests if option.contains("Done") => {
                if self.preferences.interests.is_empty() {
                    replies.push(self.record(Sender::Bot, SELECT_INTEREST_PROMPT));
                } else {
                    self.typing().await;
                    replies.push(self.record(Sender::Bot, GENERATING_PROMPT));
                    replies.push(self.generate().await);
                }
            }
            PlannerStep::Interests => self.toggle_interest(option),
            _ => replies.extend(self.store_answer(option.to_string())),
        }
        Ok(replies)
    }

    fn ensure_open(&self) -> Result<(), PlannerError> {
        match self.step {
            PlannerStep::Generating | PlannerStep::Complete => Err(PlannerError::Finished),
            _ => Ok(()),
        }
    }

    async fn typing(&self) {
        tokio::time::sleep(self.typing_latency).await;
    }

    fn record(&mut self, sender: Sender, text: &str) -> ChatMessage {
        let message = ChatMessage {
            sender,
            text: text.to_string(),
            options: Vec::new(),
        };
        self.transcript.push(message.clone());
        message
    }

    // Stores the answer for the current step and asks the next question
    fn store_answer(&mut self, value: String) -> Option<ChatMessage> {
        let next = match self.step {
            PlannerStep::Destination => {
                self.preferences.destination = Some(value);
                PlannerStep::Duration
            }
            PlannerStep::Duration => {
                self.preferences.duration = Some(value);
                PlannerStep::Budget
            }
            PlannerStep::Budget => {
                self.preferences.budget = Some(value);
                PlannerStep::Travelers
            }
            PlannerStep::Travelers => {
                self.preferences.travelers = Some(value);
                PlannerStep::Interests
            }
            _ => return None,
        };
        tracing::debug!(from = %self.step, to = %next, "planner step");
        self.step = next;

        let line = script_for(next)?;
        let prompt = ChatMessage::bot(line.prompt).with_options(line.options);
        self.transcript.push(prompt.clone());
        Some(prompt)
    }

    fn toggle_interest(&mut self, option: &str) {
        let interests = &mut self.preferences.interests;
        if let Some(position) = interests.iter().position(|i| i == option) {
            interests.remove(position);
        } else {
            interests.push(option.to_string());
        }
    }

    async fn generate(&mut self) -> ChatMessage {
        self.step = PlannerStep::Generating;
        tokio::time::sleep(self.itinerary_latency).await;

        let plan = build_plan(&self.preferences);
        let summary = format!(
            "✨ Your personalized {}-day itinerary for {} is ready! I've planned activities based on your interests: {}. Budget: {}. Perfect for {}!",
            plan.requested_days,
            plan.destination(),
            self.preferences.interests.join(", "),
            self.preferences.budget.as_deref().unwrap_or_default(),
            self.preferences.travelers.as_deref().unwrap_or_default(),
        );
        tracing::info!(destination = plan.destination(), days = plan.days.len(), "itinerary generated");

        self.plan = Some(plan);
        self.step = PlannerStep::Complete;
        self.record(Sender::Bot, &summary)
    }
}
