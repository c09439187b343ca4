//! Row codecs for the three record types

use std::str::FromStr;

use crate::types::{
    truncate_chars, Event, EventId, NewEvent, NewParticipant, Participant, ParticipantId,
    Registration, RegistrationStatus, DATE_MAX_CHARS,
};

use super::csv::{self, Field};

/// Mapping between a record and one persisted row
pub trait RowCodec: Sized {
    /// Column names, written as the first row of the file
    const HEADER: &'static [&'static str];

    /// Append the record as one row
    fn encode(&self, out: &mut String);

    /// Parse a row; the error is a human-readable reason
    fn decode(fields: &[String]) -> Result<Self, String>;
}

fn expect_columns<T: RowCodec>(fields: &[String]) -> Result<(), String> {
    if fields.len() == T::HEADER.len() {
        Ok(())
    } else {
        Err(format!(
            "expected {} fields, found {}",
            T::HEADER.len(),
            fields.len()
        ))
    }
}

fn parse_number<N: FromStr>(column: &str, value: &str) -> Result<N, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("{} is not a valid number: {:?}", column, value))
}

fn parse_id(column: &str, value: &str) -> Result<u32, String> {
    match parse_number(column, value)? {
        0 => Err(format!("{} must be at least 1", column)),
        u32::MAX => Err(format!("{} {} leaves no room for new ids", column, u32::MAX)),
        id => Ok(id),
    }
}

impl RowCodec for Event {
    const HEADER: &'static [&'static str] = &[
        "id",
        "nome",
        "descricao",
        "categoria",
        "data",
        "capacidade",
        "vagasDisponiveis",
    ];

    fn encode(&self, out: &mut String) {
        let id = self.id.to_string();
        let capacity = self.capacity.to_string();
        let available = self.available.to_string();
        csv::write_row(
            out,
            &[
                Field::Plain(&id),
                Field::Text(&self.name),
                Field::Text(&self.description),
                Field::Text(&self.category),
                Field::Plain(&self.date),
                Field::Plain(&capacity),
                Field::Plain(&available),
            ],
        );
    }

    fn decode(fields: &[String]) -> Result<Self, String> {
        expect_columns::<Self>(fields)?;

        let id = parse_id("id", &fields[0])?;
        let capacity = parse_number("capacidade", &fields[5])?;
        let available: u32 = parse_number("vagasDisponiveis", &fields[6])?;
        if available > capacity {
            return Err(format!(
                "vagasDisponiveis {} exceeds capacidade {}",
                available, capacity
            ));
        }

        let draft = NewEvent {
            name: fields[1].clone(),
            description: fields[2].clone(),
            category: fields[3].clone(),
            date: fields[4].clone(),
            capacity,
        };
        let mut event = Event::new(EventId(id), draft);
        event.available = available;
        Ok(event)
    }
}

impl RowCodec for Participant {
    const HEADER: &'static [&'static str] = &["id", "nome", "email", "telefone"];

    fn encode(&self, out: &mut String) {
        let id = self.id.to_string();
        csv::write_row(
            out,
            &[
                Field::Plain(&id),
                Field::Text(&self.name),
                Field::Text(&self.email),
                Field::Text(&self.phone),
            ],
        );
    }

    fn decode(fields: &[String]) -> Result<Self, String> {
        expect_columns::<Self>(fields)?;

        let id = parse_id("id", &fields[0])?;
        let draft = NewParticipant::new(
            fields[1].clone(),
            fields[2].clone(),
            fields[3].clone(),
        );
        Ok(Participant::new(ParticipantId(id), draft))
    }
}

impl RowCodec for Registration {
    const HEADER: &'static [&'static str] =
        &["idParticipante", "idEvento", "dataInscricao", "status"];

    fn encode(&self, out: &mut String) {
        let participant_id = self.participant_id.to_string();
        let event_id = self.event_id.to_string();
        let status = self.status.ordinal().to_string();
        csv::write_row(
            out,
            &[
                Field::Plain(&participant_id),
                Field::Plain(&event_id),
                Field::Plain(&self.date),
                Field::Plain(&status),
            ],
        );
    }

    fn decode(fields: &[String]) -> Result<Self, String> {
        expect_columns::<Self>(fields)?;

        let participant_id = parse_id("idParticipante", &fields[0])?;
        let event_id = parse_id("idEvento", &fields[1])?;
        let code: u8 = parse_number("status", &fields[3])?;
        let status = RegistrationStatus::from_ordinal(code)
            .ok_or_else(|| format!("unknown status code {}", code))?;

        Ok(Registration {
            participant_id: ParticipantId(participant_id),
            event_id: EventId(event_id),
            date: truncate_chars(fields[2].clone(), DATE_MAX_CHARS),
            status,
        })
    }
}
