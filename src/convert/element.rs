//! Generic content converters for what tables hold: captions, paragraphs,
//! breaks, bookmark anchors, and text.

use crate::dom::SourceId;
use crate::model::{Role, schema};

use super::consumable::Aspect;
use super::dispatch::{Conversion, Converter, Flow, Pass, Position};

const IDENTITY: &[Aspect] = &[Aspect::Name];

fn upcast_block(
    conv: &Converter,
    pass: &mut Pass<'_>,
    node: SourceId,
    out: &mut Conversion,
    role: Role,
) -> Flow {
    if !pass.consumed.test(node, IDENTITY) {
        return Flow::Pass;
    }
    let Some(block) = pass.safe_insert(out.cursor, role) else {
        return Flow::Pass;
    };
    pass.consumed.consume(node, IDENTITY);

    conv.convert_children(pass, node, Position::new(block, 0));

    out.produced.push(block);
    out.cursor = out.cursor.advanced(1);
    Flow::Continue
}

/// Upcast `<p>` into a paragraph.
pub fn upcast_paragraph(
    conv: &Converter,
    pass: &mut Pass<'_>,
    node: SourceId,
    out: &mut Conversion,
) -> Flow {
    upcast_block(conv, pass, node, out, Role::Paragraph)
}

/// Upcast `<caption>`/`<figcaption>` into a table caption.
pub fn upcast_caption(
    conv: &Converter,
    pass: &mut Pass<'_>,
    node: SourceId,
    out: &mut Conversion,
) -> Flow {
    upcast_block(conv, pass, node, out, Role::Caption)
}

/// Upcast `<br>` into a semantic break.
pub fn upcast_break(
    _conv: &Converter,
    pass: &mut Pass<'_>,
    node: SourceId,
    out: &mut Conversion,
) -> Flow {
    if !pass.consumed.test(node, IDENTITY) {
        return Flow::Pass;
    }
    let Some(br) = pass.safe_insert(out.cursor, Role::Break) else {
        return Flow::Pass;
    };
    pass.consumed.consume(node, IDENTITY);
    out.produced.push(br);
    out.cursor = out.cursor.advanced(1);
    Flow::Continue
}

/// Upcast `<a>`: an empty anchor carrying `id`/`name` but no `href` is a
/// non-rendering bookmark marker; anything else unwraps to its content
/// (link semantics are outside the table core).
pub fn upcast_anchor(
    conv: &Converter,
    pass: &mut Pass<'_>,
    node: SourceId,
    out: &mut Conversion,
) -> Flow {
    if !pass.consumed.test(node, IDENTITY) {
        return Flow::Pass;
    }
    let source = pass.source;
    let is_bookmark = source.get_attr(node, "href").is_none()
        && (source.get_attr(node, "id").is_some() || source.get_attr(node, "name").is_some())
        && source.is_empty(node);

    if is_bookmark {
        let Some(marker) = pass.safe_insert(out.cursor, Role::Marker) else {
            return Flow::Pass;
        };
        pass.consumed.consume(node, IDENTITY);
        out.produced.push(marker);
        out.cursor = out.cursor.advanced(1);
        return Flow::Continue;
    }

    pass.consumed.consume(node, IDENTITY);
    let converted = conv.convert_children(pass, node, out.cursor);
    out.produced.extend(converted.produced);
    out.cursor = converted.cursor;
    Flow::Continue
}

/// Upcast a text node. Whitespace-only text inside structural containers is
/// formatting noise and converts to nothing; everything else is kept
/// verbatim where the schema allows text.
pub fn upcast_text(
    _conv: &Converter,
    pass: &mut Pass<'_>,
    node: SourceId,
    out: &mut Conversion,
) -> Flow {
    let source = pass.source;
    let Some(content) = source.text_content(node) else {
        return Flow::Pass;
    };
    if content.trim().is_empty() {
        let parent_role = pass.output.role(out.cursor.parent);
        if parent_role.is_some_and(schema::is_structural_container) {
            return Flow::Pass;
        }
    }
    let Some(text) = pass.safe_insert_text(out.cursor, content) else {
        return Flow::Pass;
    };
    out.produced.push(text);
    out.cursor = out.cursor.advanced(1);
    Flow::Continue
}
