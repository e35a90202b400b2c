//! Preparation of editor HTML for the rendered preview.
//!
//! Formula images carry the formula's accessible text in `alt`. The preview
//! copies it into `title` so the text shows as a tooltip.

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_till, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{consumed, opt, recognize},
    multi::many0,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

/// An attribute inside an `<img>` start tag.
#[derive(Debug, Clone, PartialEq)]
struct Attribute<'a> {
    /// Whitespace before the attribute.
    lead: &'a str,
    /// The attribute exactly as written.
    raw: &'a str,
    name: &'a str,
    value: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
struct ImgTag<'a> {
    open: &'a str,
    attributes: Vec<Attribute<'a>>,
    /// Trailing whitespace, optional `/` and the closing `>`.
    tail: &'a str,
}

/// Copy each image's `alt` text into its `title` attribute.
///
/// Everything other than the `title` attributes of images with an `alt` is
/// passed through byte for byte. Tags that do not parse are left alone.
pub fn prepare_preview(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    let mut titled = 0usize;

    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        let candidate = &rest[pos..];

        match img_tag(candidate) {
            Ok((after, tag)) => {
                let raw = &candidate[..candidate.len() - after.len()];
                if write_titled(&mut out, &tag) {
                    titled += 1;
                } else {
                    out.push_str(raw);
                }
                rest = after;
            }
            Err(_) => {
                out.push('<');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);

    log::debug!("preview: set title on {} images", titled);
    out
}

/// Write `tag` with its title set from its alt text. Returns false, writing
/// nothing, when the tag has no `alt`.
fn write_titled(out: &mut String, tag: &ImgTag<'_>) -> bool {
    let Some(alt_text) = tag
        .attributes
        .iter()
        .find(|a| a.name.eq_ignore_ascii_case("alt"))
        .map(|a| a.value.unwrap_or(""))
    else {
        return false;
    };

    let title = format!("title=\"{}\"", alt_text.replace('"', "&quot;"));
    let mut replaced = false;

    out.push_str(tag.open);
    for attr in &tag.attributes {
        out.push_str(attr.lead);
        if !replaced && attr.name.eq_ignore_ascii_case("title") {
            out.push_str(&title);
            replaced = true;
        } else {
            out.push_str(attr.raw);
        }
    }
    if !replaced {
        out.push(' ');
        out.push_str(&title);
    }
    out.push_str(tag.tail);

    true
}

fn img_tag(input: &str) -> IResult<&str, ImgTag> {
    let (input, open) = tag_no_case("<img")(input)?;
    let (input, attributes) = many0(attribute)(input)?;
    let (input, tail) = recognize(tuple((multispace0, opt(char('/')), char('>'))))(input)?;
    Ok((
        input,
        ImgTag {
            open,
            attributes,
            tail,
        },
    ))
}

fn attribute(input: &str) -> IResult<&str, Attribute> {
    let (input, lead) = multispace1(input)?;
    let (input, (raw, (name, value))) = consumed(pair(
        attr_name,
        opt(preceded(
            tuple((multispace0, char('='), multispace0)),
            attr_value,
        )),
    ))(input)?;
    Ok((
        input,
        Attribute {
            lead,
            raw,
            name,
            value,
        },
    ))
}

fn attr_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && !matches!(c, '=' | '>' | '/' | '"' | '\''))(input)
}

fn attr_value(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_till(|c: char| c == '"'), char('"')),
        delimited(char('\''), take_till(|c: char| c == '\''), char('\'')),
        take_while1(|c: char| !c.is_whitespace() && c != '>'),
    ))(input)
}
