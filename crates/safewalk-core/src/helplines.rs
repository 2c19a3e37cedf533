//! Domestic-violence helpline directory.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Helpline {
  pub name:        &'static str,
  pub number:      &'static str,
  pub description: &'static str,
}

pub const HELPLINES: &[Helpline] = &[
  Helpline {
    name:        "SHAKTI SHALINI",
    number:      "+10920 or (011) 24373736",
    description: "Driven by the vision of a world where all women enjoy full citizenship, \
                  earn a livelihood with dignity and generate wealth and value for all.",
  },
  Helpline {
    name:        "WOMEN POLICE STATION",
    number:      "+918251233500",
    description: "Aims to reduce domestic violence through thousands of PeaceMakers who are \
                  trained in family and marriage counseling and all aspects of the Domestic \
                  Violence Act.",
  },
  Helpline {
    name:        "CHILD WELFARE COMMITTEE",
    number:      "08251230388",
    description: "Provides support to victims, from all over the country and abroad, of \
                  abuse and violence in order to empower them to become survivors.",
  },
];

pub fn find(name: &str) -> Option<&'static Helpline> {
  HELPLINES.iter().find(|h| h.name.eq_ignore_ascii_case(name))
}
