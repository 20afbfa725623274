use strum::IntoEnumIterator;

use super::components::LinkComponents;
use super::decode::{DecodeResult, Field, FromLinkComponents};
use super::field::parse_enum;
use crate::proxy::security::{Alpn, Fingerprint, RealitySettings, SecurityType, TlsSettings};

impl FromLinkComponents for TlsSettings {
    fn from_components(components: &LinkComponents) -> DecodeResult<Option<Self>> {
        if components.security != SecurityType::Tls {
            return Ok(None);
        }
        let server_name = components.string_field(Field::new("tls", "sni"), || components.host.clone())?;
        let fingerprint = components.enum_field(Field::new("tls", "fp"), Fingerprint::default())?;
        let alpn_field = Field::new("tls", "alpn");
        let alpn = components.field(
            alpn_field,
            || Alpn::iter().collect(),
            |value| {
                value
                    .split(',')
                    .map(|a| parse_enum(alpn_field, a.trim()))
                    .collect()
            },
        )?;
        Ok(Some(TlsSettings {
            fingerprint,
            alpn,
            ..TlsSettings::new(server_name)
        }))
    }
}

impl FromLinkComponents for RealitySettings {
    fn from_components(components: &LinkComponents) -> DecodeResult<Option<Self>> {
        if components.security != SecurityType::Reality {
            return Ok(None);
        }
        let public_key = components.required_field(Field::new("reality", "pbk"))?;
        let short_id = components.lenient_field(Field::new("reality", "sid"));
        let spider_x = components.lenient_field(Field::new("reality", "spx"));
        let server_name =
            components.string_field(Field::new("reality", "sni"), || components.host.clone())?;
        let fingerprint =
            components.enum_field(Field::new("reality", "fp"), Fingerprint::default())?;
        Ok(Some(RealitySettings {
            show: false,
            fingerprint,
            server_name,
            public_key,
            short_id,
            spider_x,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share_link::DecodeError;

    fn parse<T: FromLinkComponents>(query: &str) -> DecodeResult<Option<T>> {
        let link = format!("vless://u@example.com:443?type=tcp&{query}");
        T::from_components(&LinkComponents::parse(&link).unwrap())
    }

    #[test]
    fn test_not_applicable() {
        assert_eq!(parse::<TlsSettings>("security=none&fp="), Ok(None));
        assert_eq!(parse::<TlsSettings>("security=reality&pbk=k"), Ok(None));
        assert_eq!(parse::<RealitySettings>("security=tls"), Ok(None));
        assert_eq!(parse::<RealitySettings>("sni="), Ok(None));
    }

    #[test]
    fn test_tls() {
        let alpn = Field::new("tls", "alpn");
        let cases = [
            ("", Ok(TlsSettings::new("example.com".into()))),
            (
                "&sni=sni.example.com&fp=firefox&alpn=h2",
                Ok(TlsSettings {
                    server_name: "sni.example.com".into(),
                    allow_insecure: false,
                    alpn: vec![Alpn::H2],
                    fingerprint: Fingerprint::Firefox,
                }),
            ),
            (
                "&alpn=http%2F1.1%2Ch2",
                Ok(TlsSettings {
                    alpn: vec![Alpn::Http11, Alpn::H2],
                    ..TlsSettings::new("example.com".into())
                }),
            ),
            ("&sni=", Err(DecodeError::EmptyField(Field::new("tls", "sni")))),
            ("&fp=", Err(DecodeError::EmptyField(Field::new("tls", "fp")))),
            (
                "&fp=opera",
                Err(DecodeError::UnknownEnumValue {
                    field: Field::new("tls", "fp"),
                    value: "opera".into(),
                }),
            ),
            ("&alpn=", Err(DecodeError::EmptyField(alpn))),
            (
                "&alpn=h2,h3",
                Err(DecodeError::UnknownEnumValue {
                    field: alpn,
                    value: "h3".into(),
                }),
            ),
        ];
        for (query, expected) in cases {
            let tls = parse::<TlsSettings>(&format!("security=tls{query}")).map(Option::unwrap);
            assert_eq!(tls, expected, "{query}");
        }
    }

    #[test]
    fn test_reality() {
        let pbk = Field::new("reality", "pbk");
        let cases = [
            (
                "&pbk=key",
                Ok(RealitySettings {
                    show: false,
                    fingerprint: Fingerprint::Chrome,
                    server_name: "example.com".into(),
                    public_key: "key".into(),
                    short_id: String::new(),
                    spider_x: String::new(),
                }),
            ),
            (
                "&pbk=key&sid=&spx=&sni=www.apple.com&fp=safari",
                Ok(RealitySettings {
                    show: false,
                    fingerprint: Fingerprint::Safari,
                    server_name: "www.apple.com".into(),
                    public_key: "key".into(),
                    short_id: String::new(),
                    spider_x: String::new(),
                }),
            ),
            (
                "&pbk=key&sid=6ba85179e30d4fc2&spx=%2F",
                Ok(RealitySettings {
                    show: false,
                    fingerprint: Fingerprint::Chrome,
                    server_name: "example.com".into(),
                    public_key: "key".into(),
                    short_id: "6ba85179e30d4fc2".into(),
                    spider_x: "/".into(),
                }),
            ),
            ("", Err(DecodeError::MissingRequiredField(pbk))),
            ("&pbk=", Err(DecodeError::MissingRequiredField(pbk))),
            (
                "&pbk=key&sni=",
                Err(DecodeError::EmptyField(Field::new("reality", "sni"))),
            ),
            (
                "&pbk=key&fp=edge2",
                Err(DecodeError::UnknownEnumValue {
                    field: Field::new("reality", "fp"),
                    value: "edge2".into(),
                }),
            ),
        ];
        for (query, expected) in cases {
            let reality =
                parse::<RealitySettings>(&format!("security=reality{query}")).map(Option::unwrap);
            assert_eq!(reality, expected, "{query}");
        }
    }
}
