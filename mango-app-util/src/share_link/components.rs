use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;
use url::{Host, Url};

use super::decode::{DecodeError, DecodeResult, Field};
use super::field::parse_enum;
use crate::proxy::protocol::ProtocolType;
use crate::proxy::security::SecurityType;
use crate::proxy::transport::TransportType;

/// The loosely typed parts of a share link, read by every variant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkComponents {
    pub protocol_type: ProtocolType,
    pub user: String,
    pub host: String,
    pub port: u16,
    /// Decoded query items. The last occurrence of a key wins; empty values are kept.
    pub queries: BTreeMap<String, String>,
    pub network: TransportType,
    pub security: SecurityType,
    pub descriptive: String,
}

impl LinkComponents {
    pub fn parse(link: &str) -> DecodeResult<Self> {
        let link = link.trim();
        let url = match Url::parse(link) {
            Ok(url) => url,
            Err(url::ParseError::InvalidPort) => {
                return Err(DecodeError::InvalidPort(raw_port(link).to_owned()))
            }
            Err(url::ParseError::EmptyHost) => {
                return Err(DecodeError::MissingRequiredField(Field::link("host")))
            }
            Err(_) => return Err(DecodeError::MalformedLink),
        };

        let protocol_type = match ProtocolType::from_scheme(url.scheme()) {
            Some(p) if p.supports_share_link() => p,
            Some(p) => return Err(DecodeError::UnsupportedProtocol(p.to_string())),
            None => return Err(DecodeError::UnsupportedProtocol(url.scheme().into())),
        };

        let user = percent_decode(url.username())?;
        if user.is_empty() {
            return Err(DecodeError::MissingRequiredField(Field::link("user")));
        }
        let host = match url.host() {
            Some(Host::Domain(domain)) => percent_decode(domain)?,
            Some(Host::Ipv4(ip)) => ip.to_string(),
            Some(Host::Ipv6(ip)) => ip.to_string(),
            None => String::new(),
        };
        if host.is_empty() {
            return Err(DecodeError::MissingRequiredField(Field::link("host")));
        }
        let port = match url.port() {
            Some(0) => return Err(DecodeError::InvalidPort("0".into())),
            Some(port) => port,
            None => return Err(DecodeError::MissingRequiredField(Field::link("port"))),
        };

        let queries = fold_query(url.query().unwrap_or_default())?;
        let network = match queries.get("type").map(String::as_str) {
            None => return Err(DecodeError::MissingRequiredField(Field::link("type"))),
            Some("") => return Err(DecodeError::EmptyField(Field::link("type"))),
            Some(value) => parse_enum::<TransportType>(Field::link("type"), value)?,
        };
        let mut components = Self {
            protocol_type,
            user,
            host,
            port,
            queries,
            network,
            security: SecurityType::None,
            descriptive: extract_descriptive(&url)?,
        };
        components.security = components.enum_field(Field::link("security"), SecurityType::None)?;
        Ok(components)
    }
}

fn percent_decode(s: &str) -> DecodeResult<String> {
    Ok(percent_decode_str(s)
        .decode_utf8()
        .map_err(|_| DecodeError::MalformedLink)?
        .into_owned())
}

/// Folds `k=v` items into a map. Later items win; an item without `=` clears its key.
/// Values are percent-decoded only, so a literal `+` survives.
fn fold_query(query: &str) -> DecodeResult<BTreeMap<String, String>> {
    let mut queries = BTreeMap::new();
    for item in query.split('&').filter(|item| !item.is_empty()) {
        match item.split_once('=') {
            Some((key, value)) => {
                queries.insert(percent_decode(key)?, percent_decode(value)?);
            }
            None => {
                queries.remove(&percent_decode(item)?);
            }
        }
    }
    Ok(queries)
}

fn extract_descriptive(url: &Url) -> DecodeResult<String> {
    Ok(url
        .fragment()
        .map(|s| {
            let mut decoded = percent_decode(s);
            if !(s.contains(' ') || s.contains("%20")) {
                decoded = decoded.map(|s| s.replace('+', " "));
            }
            decoded
        })
        .transpose()?
        .unwrap_or_default())
}

/// The text between the last `:` of the authority and its end.
fn raw_port(link: &str) -> &str {
    let authority = link
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(link);
    let authority = authority
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host_port = authority
        .rsplit_once('@')
        .map(|(_, host_port)| host_port)
        .unwrap_or(authority);
    match host_port.rsplit_once(':') {
        Some((_, port)) if !port.ends_with(']') => port,
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_components() {
        let components = LinkComponents::parse(
            "vless://a%40b@example.com:443?type=ws&path=%2Fws&path=%2Flast&host=&security=tls#Node%2FA+1",
        )
        .unwrap();
        assert_eq!(
            components,
            LinkComponents {
                protocol_type: ProtocolType::Vless,
                user: "a@b".into(),
                host: "example.com".into(),
                port: 443,
                queries: BTreeMap::from([
                    ("type".into(), "ws".into()),
                    ("path".into(), "/last".into()),
                    ("host".into(), "".into()),
                    ("security".into(), "tls".into()),
                ]),
                network: TransportType::Ws,
                security: SecurityType::Tls,
                descriptive: "Node/A 1".into(),
            }
        );
    }

    #[test]
    fn test_parse_hosts() {
        let cases = [
            ("vmess://u@1.1.1.1:80?type=tcp", "1.1.1.1"),
            ("vmess://u@[::1]:80?type=tcp", "::1"),
            ("vmess://u@Example.com:80?type=tcp", "Example.com"),
        ];
        for (link, host) in cases {
            assert_eq!(LinkComponents::parse(link).unwrap().host, host, "{link}");
        }
    }

    #[test]
    fn test_parse_defaults() {
        let components = LinkComponents::parse("vless://u@a.co:1?type=tcp").unwrap();
        assert_eq!(components.security, SecurityType::None);
        assert_eq!(components.descriptive, "");
    }

    #[test]
    fn test_parse_errors() {
        let cases = [
            ("not a link", DecodeError::MalformedLink),
            (
                "http://u@a.co:80?type=tcp",
                DecodeError::UnsupportedProtocol("http".into()),
            ),
            (
                "vless://a.co:443?type=tcp",
                DecodeError::MissingRequiredField(Field::link("user")),
            ),
            (
                "vless://u@:443?type=tcp",
                DecodeError::MissingRequiredField(Field::link("host")),
            ),
            (
                "vless://u@a.co?type=tcp",
                DecodeError::MissingRequiredField(Field::link("port")),
            ),
            (
                "vless://u@a.co:0?type=tcp",
                DecodeError::InvalidPort("0".into()),
            ),
            (
                "vless://u@a.co:65536?type=tcp",
                DecodeError::InvalidPort("65536".into()),
            ),
            (
                "vless://u@a.co:443",
                DecodeError::MissingRequiredField(Field::link("type")),
            ),
            (
                "vless://u@a.co:443?type=",
                DecodeError::EmptyField(Field::link("type")),
            ),
            (
                "vless://u@a.co:443?type=xhttp",
                DecodeError::UnknownEnumValue {
                    field: Field::link("type"),
                    value: "xhttp".into(),
                },
            ),
            (
                "vless://u@a.co:443?type=tcp&security=",
                DecodeError::EmptyField(Field::link("security")),
            ),
            (
                "vless://u@a.co:443?type=tcp&security=xtls",
                DecodeError::UnknownEnumValue {
                    field: Field::link("security"),
                    value: "xtls".into(),
                },
            ),
        ];
        for (link, expected) in cases {
            assert_eq!(LinkComponents::parse(link).unwrap_err(), expected, "{link}");
        }
    }

    #[test]
    fn test_fold_query() {
        let cases = [
            ("seed=a+b", vec![("seed", "a+b")]),
            ("seed=a%2Bb%20c", vec![("seed", "a+b c")]),
            ("path=%2F&path=%2Fws", vec![("path", "/ws")]),
            ("sid=&spx=%2F", vec![("sid", ""), ("spx", "/")]),
            ("host=a.co&host", vec![]),
            ("&&type=tcp&", vec![("type", "tcp")]),
            ("key=a=b", vec![("key", "a=b")]),
        ];
        for (query, expected) in cases {
            let expected: BTreeMap<_, _> = expected
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            assert_eq!(fold_query(query).unwrap(), expected, "{query}");
        }
        assert_eq!(fold_query("seed=%ff"), Err(DecodeError::MalformedLink));
    }

    #[test]
    fn test_parse_keeps_plus_in_values() {
        let components =
            LinkComponents::parse("vless://u@a.co:443?type=kcp&seed=a+b&headerType=none").unwrap();
        assert_eq!(components.queries["seed"], "a+b");
    }

    #[test]
    fn test_raw_port() {
        let cases = [
            ("vless://u@a.co:99999?type=tcp", "99999"),
            ("vless://u@[::1]:70000/", "70000"),
            ("vless://u@[::1]", ""),
        ];
        for (link, expected) in cases {
            assert_eq!(raw_port(link), expected, "{link}");
        }
    }
}
