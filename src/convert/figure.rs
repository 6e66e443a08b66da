//! Unwrap of captioned-figure table wrappers.

use crate::dom::SourceId;

use super::consumable::Aspect;
use super::dispatch::{Conversion, Converter, Flow, Pass, Position};

/// Upcast a `<figure class="table">` wrapper by forwarding conversion to
/// the table inside it.
///
/// This is the one two-phase handler: it claims the figure before
/// converting the inner table, and if that conversion produces nothing the
/// claim is reverted so other handlers still get a clean slate. On success
/// the figure's remaining children (typically a `<figcaption>`) are
/// converted at the end of the produced table, and the table's range
/// becomes the figure's result.
pub fn unwrap_table_figure(
    conv: &Converter,
    pass: &mut Pass<'_>,
    figure: SourceId,
    out: &mut Conversion,
) -> Flow {
    let source = pass.source;
    if !source.has_class(figure, "table") {
        return Flow::Pass;
    }

    let aspects = [Aspect::Name, Aspect::class("table")];
    if !pass.consumed.test(figure, &aspects) {
        return Flow::Pass;
    }

    let Some(inner) = source.children(figure).find(|&c| source.is_named(c, "table")) else {
        return Flow::Pass;
    };
    if !pass.consumed.test(inner, &[Aspect::Name]) {
        return Flow::Pass;
    }

    pass.consumed.consume(figure, &aspects);

    let converted = conv.convert(pass, inner, out.cursor);
    let Some(model_table) = converted.first() else {
        pass.consumed.revert(figure, &aspects);
        return Flow::Pass;
    };

    for child in source.children(figure) {
        if child == inner {
            continue;
        }
        if source.is_element(child) && !pass.consumed.test(child, &[Aspect::Name]) {
            continue;
        }
        let pos = Position::end(pass.output, model_table);
        conv.convert(pass, child, pos);
    }

    out.produced.extend(converted.produced);
    out.cursor = converted.cursor;
    Flow::Continue
}
