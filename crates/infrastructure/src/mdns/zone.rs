//! Zone-file style record reader used for cache preloads and fixtures.
//!
//! One record per line: `name [ttl] [class] type rdata...`. Names are always
//! taken as fully qualified. `;` starts a comment outside quoted strings.

use ferrous_mdns_application::services::parse_name;
use ferrous_mdns_domain::DomainError;
use hickory_proto::rr::rdata::{A, AAAA, CNAME, PTR, SRV, TXT};
use hickory_proto::rr::{DNSClass, RData, Record, RecordType};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// TTL for lines that omit one (RFC 6762 §10).
pub const DEFAULT_ZONE_TTL: u32 = 120;

pub fn parse_zone(text: &str) -> Result<Vec<Record>, DomainError> {
    let mut records = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let tokens = tokenize(line).map_err(|reason| invalid(line_no, reason))?;
        if tokens.is_empty() {
            continue;
        }
        records.push(record_from_tokens(&tokens).map_err(|reason| invalid(line_no, reason))?);
    }
    Ok(records)
}

/// Parses a single record line.
pub fn parse_record(line: &str) -> Result<Record, DomainError> {
    let tokens = tokenize(line).map_err(|reason| invalid(1, reason))?;
    if tokens.is_empty() {
        return Err(invalid(1, "empty line".to_string()));
    }
    record_from_tokens(&tokens).map_err(|reason| invalid(1, reason))
}

fn invalid(line: usize, reason: String) -> DomainError {
    DomainError::InvalidZoneEntry { line, reason }
}

fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ';' => break,
            c if c.is_whitespace() => {
                chars.next();
            }
            '"' => {
                chars.next();
                let mut quoted = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped) => quoted.push(escaped),
                            None => return Err("dangling escape".to_string()),
                        },
                        Some(c) => quoted.push(c),
                        None => return Err("unterminated quoted string".to_string()),
                    }
                }
                tokens.push(quoted);
            }
            _ => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == ';' || c == '"' {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                tokens.push(word);
            }
        }
    }

    Ok(tokens)
}

fn record_from_tokens(tokens: &[String]) -> Result<Record, String> {
    let name = parse_name(&tokens[0]).map_err(|e| e.to_string())?;
    let mut rest = &tokens[1..];

    let mut ttl = None;
    let mut class = None;
    // TTL and class may appear in either order.
    for _ in 0..2 {
        let Some(token) = rest.first() else { break };
        if ttl.is_none() {
            if let Ok(value) = token.parse::<u32>() {
                ttl = Some(value);
                rest = &rest[1..];
                continue;
            }
        }
        if class.is_none() {
            if let Ok(value) = DNSClass::from_str(&token.to_ascii_uppercase()) {
                class = Some(value);
                rest = &rest[1..];
                continue;
            }
        }
        break;
    }

    let (type_token, rdata) = rest
        .split_first()
        .ok_or_else(|| "missing record type".to_string())?;
    let record_type = RecordType::from_str(&type_token.to_ascii_uppercase())
        .map_err(|_| format!("unknown record type '{}'", type_token))?;

    let rdata = parse_rdata(record_type, rdata)?;
    let mut record = Record::from_rdata(name, ttl.unwrap_or(DEFAULT_ZONE_TTL), rdata);
    if let Some(class) = class {
        record.set_dns_class(class);
    }
    Ok(record)
}

fn parse_rdata(record_type: RecordType, fields: &[String]) -> Result<RData, String> {
    let expect = |count: usize| {
        if fields.len() == count {
            Ok(())
        } else {
            Err(format!(
                "{} expects {} field(s), found {}",
                record_type,
                count,
                fields.len()
            ))
        }
    };

    match record_type {
        RecordType::A => {
            expect(1)?;
            let ip = Ipv4Addr::from_str(&fields[0])
                .map_err(|e| format!("bad IPv4 address '{}': {}", fields[0], e))?;
            Ok(RData::A(A(ip)))
        }
        RecordType::AAAA => {
            expect(1)?;
            let ip = Ipv6Addr::from_str(&fields[0])
                .map_err(|e| format!("bad IPv6 address '{}': {}", fields[0], e))?;
            Ok(RData::AAAA(AAAA(ip)))
        }
        RecordType::CNAME => {
            expect(1)?;
            Ok(RData::CNAME(CNAME(target(&fields[0])?)))
        }
        RecordType::PTR => {
            expect(1)?;
            Ok(RData::PTR(PTR(target(&fields[0])?)))
        }
        RecordType::SRV => {
            expect(4)?;
            let number = |field: &String| {
                field
                    .parse::<u16>()
                    .map_err(|e| format!("bad SRV field '{}': {}", field, e))
            };
            Ok(RData::SRV(SRV::new(
                number(&fields[0])?,
                number(&fields[1])?,
                number(&fields[2])?,
                target(&fields[3])?,
            )))
        }
        RecordType::TXT => {
            if fields.is_empty() {
                return Err("TXT expects at least one string".to_string());
            }
            Ok(RData::TXT(TXT::new(fields.to_vec())))
        }
        other => Err(format!("unsupported record type {}", other)),
    }
}

fn target(field: &str) -> Result<hickory_proto::rr::Name, String> {
    parse_name(field).map_err(|e| e.to_string())
}
