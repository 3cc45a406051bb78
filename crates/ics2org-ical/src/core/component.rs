//! iCalendar component tree (RFC 5545 §3.4-3.6).

use super::Property;

/// Component kind for iCalendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// VCALENDAR wrapper component.
    Calendar,
    /// VEVENT component.
    Event,
    /// VTODO component.
    Todo,
    /// VJOURNAL component.
    Journal,
    /// VFREEBUSY component.
    FreeBusy,
    /// VTIMEZONE component.
    Timezone,
    /// VALARM component (nested within VEVENT/VTODO).
    Alarm,
    /// STANDARD sub-component of VTIMEZONE.
    Standard,
    /// DAYLIGHT sub-component of VTIMEZONE.
    Daylight,
    /// Unknown/X-component.
    Unknown,
}

impl ComponentKind {
    /// Returns the string name for this component kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "VCALENDAR",
            Self::Event => "VEVENT",
            Self::Todo => "VTODO",
            Self::Journal => "VJOURNAL",
            Self::FreeBusy => "VFREEBUSY",
            Self::Timezone => "VTIMEZONE",
            Self::Alarm => "VALARM",
            Self::Standard => "STANDARD",
            Self::Daylight => "DAYLIGHT",
            Self::Unknown => "X-UNKNOWN",
        }
    }

    /// Parses a component kind from a name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "VCALENDAR" => Self::Calendar,
            "VEVENT" => Self::Event,
            "VTODO" => Self::Todo,
            "VJOURNAL" => Self::Journal,
            "VFREEBUSY" => Self::FreeBusy,
            "VTIMEZONE" => Self::Timezone,
            "VALARM" => Self::Alarm,
            "STANDARD" => Self::Standard,
            "DAYLIGHT" => Self::Daylight,
            _ => Self::Unknown,
        }
    }
}

/// A single iCalendar component: properties plus nested subcomponents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Kind of this component.
    pub kind: ComponentKind,
    /// Component name as written in the source (uppercased).
    pub name: String,
    /// Properties attached directly to this component.
    pub properties: Vec<Property>,
    /// Nested subcomponents in source order.
    pub children: Vec<Component>,
}

impl Component {
    /// Creates an empty component of the given kind.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            name: kind.as_str().to_string(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an empty component from a `BEGIN:` argument.
    ///
    /// X-components keep their source name with kind
    /// [`ComponentKind::Unknown`].
    #[must_use]
    pub fn named(name: &str) -> Self {
        let name = name.to_ascii_uppercase();
        Self {
            kind: ComponentKind::parse(&name),
            name,
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds a property.
    pub fn add_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// Adds a nested subcomponent.
    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// Returns the first property with the given name (case-insensitive).
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns every property with the given name (case-insensitive).
    #[must_use]
    pub fn get_properties(&self, name: &str) -> Vec<&Property> {
        self.properties
            .iter()
            .filter(|p| p.name.eq_ignore_ascii_case(name))
            .collect()
    }

    /// Returns the UID property text, if any.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.get_property("UID").and_then(Property::as_text)
    }

    /// Returns the SUMMARY property text, if any.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.get_property("SUMMARY").and_then(Property::as_text)
    }

    /// Returns the DESCRIPTION property text, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.get_property("DESCRIPTION").and_then(Property::as_text)
    }

    /// Returns the LOCATION property text, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.get_property("LOCATION").and_then(Property::as_text)
    }

    /// Returns the nested subcomponents of the given kind.
    #[must_use]
    pub fn children_of_kind(&self, kind: ComponentKind) -> Vec<&Component> {
        self.children.iter().filter(|c| c.kind == kind).collect()
    }
}

/// A parsed iCalendar document: the root VCALENDAR component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ICalendar {
    /// Root VCALENDAR component.
    pub root: Component,
}

impl ICalendar {
    /// Returns the top-level VEVENT components.
    #[must_use]
    pub fn events(&self) -> Vec<&Component> {
        self.root.children_of_kind(ComponentKind::Event)
    }

    /// Returns the top-level VTIMEZONE components.
    #[must_use]
    pub fn timezones(&self) -> Vec<&Component> {
        self.root.children_of_kind(ComponentKind::Timezone)
    }

    /// Returns the calendar display name (`X-WR-CALNAME`), if present.
    #[must_use]
    pub fn calendar_name(&self) -> Option<&str> {
        self.root
            .get_property("X-WR-CALNAME")
            .and_then(Property::as_text)
    }
}
