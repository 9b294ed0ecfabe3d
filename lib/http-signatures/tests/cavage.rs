use http_signatures::cavage::{self, SignatureHeader};
use proptest::{prop_assert, proptest};
use ring::signature::{ED25519, KeyPair, UnparsedPublicKey};


#[test]
fn basic_signature() {
    let req = self::data::draft_request();
    let public_key = self::data::draft_public_key();

    let signature_header = cavage::parse(r#"keyId="Test",algorithm="rsa-sha256",headers="(request-target) host date",signature="qdx+H7PHHDZgy4y/Ahn9Tny9V3GP6YgBPyUXMmoxWtLbHpUnXS2mg2+SbrQDMCJypxBLSPQR2aAjn7ndmw2iicw3HMbe8VfEdKFYRqzic+efkb3nndiv/x1xSHDJWeSWkx3ButlYSuBskLu6kd9Fswtemr3lgdDEmn04swr2Os0=""#).unwrap();
    let signature_string =
        cavage::signature_string::construct(&req, &signature_header).unwrap();

    assert!(
        http_signatures::crypto::verify(
            signature_string.as_bytes(),
            signature_header.signature,
            &public_key
        )
        .is_ok()
    );
}

#[test]
fn sign_serialise_parse_verify() {
    let req = self::data::draft_request();
    let key = self::data::ed25519_key();
    let public_key = UnparsedPublicKey::new(&ED25519, key.public_key().as_ref().to_vec());

    let unsigned = SignatureHeader {
        key_id: "did:key:foo".into(),
        algorithm: Some(cavage::HS2019),
        headers: ["(key-id)", "(created)", "(request-target)", "host", "digest"].into_iter(),
        signature: (),
        created: Some(1_388_957_500),
        expires: None,
    };
    let signature_string = cavage::signature_string::construct(&req, &unsigned).unwrap();
    let signature = http_signatures::crypto::sign(signature_string.as_bytes(), &key).unwrap();
    let header_value = cavage::serialise(unsigned.with_signature(signature));

    let parsed = cavage::parse(&header_value).unwrap();
    assert_eq!(parsed.key_id, "did:key:foo");
    assert_eq!(parsed.algorithm, Some(cavage::HS2019));

    let reconstructed = cavage::signature_string::construct(&req, &parsed).unwrap();
    assert_eq!(reconstructed, signature_string);
    assert!(
        http_signatures::crypto::verify(reconstructed.as_bytes(), parsed.signature, &public_key)
            .is_ok()
    );
}

proptest! {
    #[test]
    fn parse_never_panics(input: String) {
        let _ = cavage::parse(&input);
    }

    #[test]
    fn serialised_key_id_roundtrips(key_id in "[a-zA-Z0-9:#._-]{1,64}", created in 0_u64..u64::from(u32::MAX)) {
        let header = SignatureHeader {
            key_id: key_id.as_str().into(),
            algorithm: None,
            headers: ["host"].into_iter(),
            signature: "c2ln",
            created: Some(created),
            expires: None,
        };
        let serialised = cavage::serialise(header);
        let parsed = cavage::parse(&serialised).unwrap();

        prop_assert!(parsed.key_id == key_id);
        prop_assert!(parsed.created == Some(created));
    }
}
