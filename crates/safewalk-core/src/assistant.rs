//! The SafeWalk assistant: an ordered keyword rule table.
//!
//! Input is lower-cased and checked against each feature's keywords in table
//! order; the first feature with any keyword as a substring answers. Without a
//! feature match, greetings and thanks get canned replies and everything else
//! gets the default. There is no memory beyond the transcript itself.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const GREETING: &str = "Hello! I'm the SafeWalk Assistant. How can I help you today?";

const HELLO_REPLY: &str = "Hello! How can I help you today? You can ask me about emergency \
   assistance, incident reporting, safety zones, or personal safety tips.";

const THANKS_REPLY: &str =
  "You're welcome! Your safety is our priority. Is there anything else you'd like to know?";

const DEFAULT_REPLY: &str = "I'm not sure I understand. Could you try rephrasing your \
   question? You can ask me about emergency assistance, incident reporting, safety zones, or \
   personal safety tips.";

const FOLLOW_UP_INTRO: &str = "Here are some related questions you might be interested in:";

const TOPIC_FOLLOW_UP_INTRO: &str = "Here are some common questions about this topic:";

// ─── Rule table ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feature {
  pub title:      &'static str,
  #[serde(skip)]
  pub keywords:   &'static [&'static str],
  #[serde(skip)]
  pub response:   &'static str,
  pub follow_ups: &'static [&'static str],
}

pub const FEATURES: &[Feature] = &[
  Feature {
    title:      "Emergency Assistance",
    keywords:   &["emergency", "help", "sos", "danger", "urgent", "assistance"],
    response:   "For immediate emergency assistance, use the SOS button. It will alert your \
                 emergency contacts and local authorities. Would you like to know more about \
                 our emergency features?",
    follow_ups: &[
      "How does the SOS feature work?",
      "Who gets notified in an emergency?",
      "How can I add emergency contacts?",
    ],
  },
  Feature {
    title:      "Incident Reporting",
    keywords:   &["report", "incident", "submit", "inform", "community"],
    response:   "You can report incidents through our Community section. Your reports help \
                 keep others informed and safe. Would you like to know how to submit a report?",
    follow_ups: &[
      "What types of incidents should I report?",
      "How detailed should my report be?",
      "Can I report anonymously?",
    ],
  },
  Feature {
    title:      "Safety Zones",
    keywords:   &["safe", "zone", "area", "location", "map", "route"],
    response:   "Our Safety Zones feature shows safe areas near you and provides safety \
                 ratings for different locations. Would you like to learn how to find safe \
                 zones in your area?",
    follow_ups: &[
      "How are safety zones determined?",
      "Can I contribute to safety ratings?",
      "How often is the safety data updated?",
    ],
  },
  Feature {
    title:      "Personal Safety Tips",
    keywords:   &["tips", "advice", "safety", "precautions", "protect"],
    response:   "Here are some essential safety tips: Stay aware of your surroundings, trust \
                 your instincts, keep your phone charged, and share your location with trusted \
                 contacts. Would you like more specific safety advice?",
    follow_ups: &[
      "What should I do if I feel unsafe?",
      "How can I stay safe while traveling?",
      "What are some basic self-defense tips?",
    ],
  },
  Feature {
    title:      "Emergency Contacts",
    keywords:   &["contact", "number", "phone", "emergency contact", "helpline"],
    response:   "You can manage your emergency contacts in the Emergency Contacts section. \
                 These contacts will be notified immediately when you trigger an SOS alert. \
                 Would you like to know how to add emergency contacts?",
    follow_ups: &[
      "How many emergency contacts can I add?",
      "How do I update my emergency contacts?",
      "What information do my contacts receive?",
    ],
  },
];

/// The first feature whose keywords appear in `input`.
pub fn find_feature(input: &str) -> Option<&'static Feature> {
  let input = input.to_lowercase();
  FEATURES
    .iter()
    .find(|f| f.keywords.iter().any(|k| input.contains(k)))
}

pub fn feature_by_title(title: &str) -> Option<&'static Feature> {
  FEATURES.iter().find(|f| f.title.eq_ignore_ascii_case(title))
}

/// The assistant's answer to one user message.
pub fn respond(input: &str) -> &'static str {
  if let Some(feature) = find_feature(input) {
    return feature.response;
  }
  let input = input.to_lowercase();
  if input.contains("hello") || input.contains("hi") {
    HELLO_REPLY
  } else if input.contains("thank") {
    THANKS_REPLY
  } else {
    DEFAULT_REPLY
  }
}

/// Simulated typing time for a reply of this length.
pub fn typing_delay(reply: &str) -> Duration {
  Duration::from_millis((reply.chars().count() as u64 * 20).min(2000))
}

// ─── Transcript ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
  User,
  Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
  #[serde(rename = "type")]
  pub sender:    Sender,
  pub content:   String,
  pub timestamp: DateTime<Utc>,
}

impl Message {
  fn new(sender: Sender, content: impl Into<String>) -> Self {
    Self { sender, content: content.into(), timestamp: Utc::now() }
  }
}

/// The visible conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
  pub messages: Vec<Message>,
}

impl Default for Transcript {
  fn default() -> Self {
    Self { messages: vec![Message::new(Sender::Bot, GREETING)] }
  }
}

impl Transcript {
  pub fn new() -> Self { Self::default() }

  /// Handle a typed message. Returns the messages appended, or nothing for
  /// blank input.
  pub fn send(&mut self, input: &str) -> &[Message] {
    if input.trim().is_empty() {
      return &[];
    }
    let start = self.messages.len();
    self.messages.push(Message::new(Sender::User, input));
    self.messages.push(Message::new(Sender::Bot, respond(input)));
    if let Some(feature) = find_feature(input) {
      self.push_follow_ups(FOLLOW_UP_INTRO, feature);
    }
    &self.messages[start..]
  }

  /// Handle a click on one of the feature shortcuts.
  pub fn choose(&mut self, feature: &Feature) -> &[Message] {
    let start = self.messages.len();
    self
      .messages
      .push(Message::new(Sender::User, format!("Tell me about {}", feature.title)));
    self.messages.push(Message::new(Sender::Bot, feature.response));
    self.push_follow_ups(TOPIC_FOLLOW_UP_INTRO, feature);
    &self.messages[start..]
  }

  /// Back to the opening greeting.
  pub fn reset(&mut self) { *self = Self::default(); }

  fn push_follow_ups(&mut self, intro: &str, feature: &Feature) {
    if feature.follow_ups.is_empty() {
      return;
    }
    self.messages.push(Message::new(Sender::Bot, intro));
    self
      .messages
      .push(Message::new(Sender::Bot, feature.follow_ups.join("\n")));
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn emergency_message_hits_emergency_feature() {
    assert_eq!(respond("I need help with an emergency"), FEATURES[0].response);
    assert_eq!(find_feature("I need help with an emergency").unwrap().title, "Emergency Assistance");
  }

  #[test]
  fn first_match_wins_in_table_order() {
    // "report" (Incident Reporting) precedes "safety" (Personal Safety Tips).
    assert_eq!(find_feature("how do I report a safety issue").unwrap().title, "Incident Reporting");
  }

  #[test]
  fn matching_ignores_case() {
    assert_eq!(find_feature("SHOW ME THE MAP").unwrap().title, "Safety Zones");
  }

  #[test]
  fn fallbacks() {
    assert_eq!(respond("hello there"), HELLO_REPLY);
    assert_eq!(respond("thank you!"), THANKS_REPLY);
    assert_eq!(respond("qwerty"), DEFAULT_REPLY);
  }

  #[test]
  fn typing_delay_is_capped() {
    assert_eq!(typing_delay("abcd"), Duration::from_millis(80));
    assert_eq!(typing_delay(FEATURES[0].response), Duration::from_millis(2000));
  }

  #[test]
  fn transcript_appends_reply_and_follow_ups() {
    let mut t = Transcript::new();
    assert_eq!(t.messages.len(), 1);

    let added = t.send("any tips or advice?").to_vec();
    assert_eq!(added.len(), 4);
    assert_eq!(added[0].sender, Sender::User);
    assert_eq!(added[1].content, feature_by_title("Personal Safety Tips").unwrap().response);
    assert_eq!(added[2].content, FOLLOW_UP_INTRO);
    assert_eq!(added[3].content.lines().count(), 3);

    assert_eq!(t.send("qwerty").len(), 2);
    assert!(t.send("   ").is_empty());
    assert_eq!(t.messages.len(), 7);

    t.reset();
    assert_eq!(t.messages.len(), 1);
    assert_eq!(t.messages[0].content, GREETING);
  }

  #[test]
  fn choosing_a_feature() {
    let mut t = Transcript::new();
    let feature = feature_by_title("safety zones").unwrap();
    let added = t.choose(feature);
    assert_eq!(added[0].content, "Tell me about Safety Zones");
    assert_eq!(added[2].content, TOPIC_FOLLOW_UP_INTRO);
  }
}
