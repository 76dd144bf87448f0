use tracing::trace;

use crate::connection::{Connection, Parameters};
use crate::errors::CypherGraphError;
use crate::index::{run_statement, text_column};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerEvent {
    Create,
    Update,
    Delete,
}

impl TriggerEvent {
    pub fn keyword(&self) -> &'static str {
        match self {
            TriggerEvent::Create => "CREATE",
            TriggerEvent::Update => "UPDATE",
            TriggerEvent::Delete => "DELETE",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "CREATE" => Some(TriggerEvent::Create),
            "UPDATE" => Some(TriggerEvent::Update),
            "DELETE" => Some(TriggerEvent::Delete),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TriggerObject {
    #[default]
    AllObjects,
    /// `()`
    Node,
    /// `-->`
    Relationship,
}

impl TriggerObject {
    pub fn pattern(&self) -> &'static str {
        match self {
            TriggerObject::AllObjects => "",
            TriggerObject::Node => "()",
            TriggerObject::Relationship => "-->",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TriggerPhase {
    Before,
    #[default]
    After,
}

impl TriggerPhase {
    pub fn keyword(&self) -> &'static str {
        match self {
            TriggerPhase::Before => "BEFORE",
            TriggerPhase::After => "AFTER",
        }
    }
}

/// A Memgraph trigger. `statement` is usually another builder's
/// [`construct_query`](crate::QueryBuilder::construct_query).
///
/// ```rust
/// use cyphergraph::{Trigger, TriggerEvent, TriggerObject, TriggerPhase};
///
/// let trigger = Trigger::new("audit", "UNWIND createdVertices AS v SET v.seen = 1")
///     .on(TriggerEvent::Create, TriggerObject::Node)
///     .phase(TriggerPhase::Before);
/// assert_eq!(
///     trigger.to_create_query(),
///     "CREATE TRIGGER audit ON () CREATE BEFORE COMMIT EXECUTE UNWIND createdVertices AS v SET v.seen = 1;"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trigger {
    pub name: String,
    pub event_type: Option<TriggerEvent>,
    pub event_object: Option<TriggerObject>,
    pub phase: TriggerPhase,
    pub statement: String,
}

impl Trigger {
    pub fn new<N: Into<String>, S: Into<String>>(name: N, statement: S) -> Self {
        Self {
            name: name.into(),
            event_type: None,
            event_object: None,
            phase: TriggerPhase::default(),
            statement: statement.into(),
        }
    }

    pub fn on(mut self, event: TriggerEvent, object: TriggerObject) -> Self {
        self.event_type = Some(event);
        self.event_object = Some(object);
        self
    }

    pub fn phase(mut self, phase: TriggerPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn to_create_query(&self) -> String {
        let mut query = format!("CREATE TRIGGER {}", self.name);
        if let Some(event) = self.event_type {
            query.push_str(" ON");
            let object = self.event_object.unwrap_or_default().pattern();
            if !object.is_empty() {
                query.push(' ');
                query.push_str(object);
            }
            query.push(' ');
            query.push_str(event.keyword());
        }
        query.push_str(&format!(
            " {} COMMIT EXECUTE {};",
            self.phase.keyword(),
            self.statement
        ));
        query
    }

    pub fn to_drop_query(&self) -> String {
        drop_query(&self.name)
    }
}

fn drop_query(name: &str) -> String {
    format!("DROP TRIGGER {name};")
}

pub fn create_trigger<C: Connection + ?Sized>(
    conn: &C,
    trigger: &Trigger,
) -> Result<(), CypherGraphError> {
    run_statement(conn, &trigger.to_create_query())
}

pub fn drop_trigger<C: Connection + ?Sized>(conn: &C, name: &str) -> Result<(), CypherGraphError> {
    run_statement(conn, &drop_query(name))
}

pub fn get_triggers<C: Connection + ?Sized>(conn: &C) -> Result<Vec<Trigger>, CypherGraphError> {
    let mut triggers = Vec::new();
    for row in conn.execute_and_fetch("SHOW TRIGGERS;", &Parameters::new())? {
        let row = row?;
        let (event_type, event_object) = parse_event(&text_column(&row, "event type")?)?;
        let phase = match text_column(&row, "phase")?.as_str() {
            "BEFORE COMMIT" => TriggerPhase::Before,
            "AFTER COMMIT" => TriggerPhase::After,
            other => {
                return Err(CypherGraphError::query(format!(
                    "unknown trigger phase `{other}`"
                )));
            }
        };
        triggers.push(Trigger {
            name: text_column(&row, "trigger name")?,
            event_type,
            event_object,
            phase,
            statement: text_column(&row, "statement")?,
        });
    }
    Ok(triggers)
}

pub fn drop_triggers<C: Connection + ?Sized>(conn: &C) -> Result<(), CypherGraphError> {
    for trigger in get_triggers(conn)? {
        trace!(name = %trigger.name, "dropping trigger");
        drop_trigger(conn, &trigger.name)?;
    }
    Ok(())
}

/// `ANY`, `CREATE`, `() UPDATE`, `--> DELETE`, ...
fn parse_event(
    raw: &str,
) -> Result<(Option<TriggerEvent>, Option<TriggerObject>), CypherGraphError> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("ANY") {
        return Ok((None, None));
    }
    let (object, event) = match raw.split_once(' ') {
        Some(("()", event)) => (TriggerObject::Node, event),
        Some(("-->", event)) => (TriggerObject::Relationship, event),
        _ => (TriggerObject::AllObjects, raw),
    };
    let event = TriggerEvent::parse(event.trim())
        .ok_or_else(|| CypherGraphError::query(format!("unknown trigger event `{raw}`")))?;
    Ok((Some(event), Some(object)))
}
