use crate::{
    args::{ParseHeaderArgs, SignatureScheme},
    util::Mood,
};

pub fn do_it(args: ParseHeaderArgs) -> miette::Result<()> {
    if args.scheme != SignatureScheme::Cavage {
        miette::bail!(
            "Only the Cavage scheme is supported at this time. {}",
            Mood::Sad
        );
    }

    let header = args.header;
    if let Err(err) = http_signatures::cavage::parse(&header) {
        return Err(miette::Error::new(err).with_source_code(header.clone()));
    }

    eprintln!("✅ Header is valid! {}", Mood::Happy);

    Ok(())
}
