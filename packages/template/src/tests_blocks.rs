//! Nested-block accumulation tests: a flat push sequence must reproduce
//! nested loops, because pushing an outer row consumes the accumulated rows
//! of its direct child blocks.

use crate::renderer::Template;
use crate::simple::SimpleTemplate;
use std::collections::HashMap;

fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

const NESTED: &str = "<!-- BEGIN A --><a id=\"{A_ID}\"><!-- BEGIN B --><b id=\"{B_ID}\"><!-- BEGIN C --><c id=\"{C_ID}\"/><!-- END C --></b><!-- END B --></a><!-- END A -->";

#[test]
fn test_three_level_loop() {
    let mut tpl = SimpleTemplate::new();
    tpl.set_content(NESTED);

    for i in 0..2 {
        for j in 0..2 {
            for k in 0..2 {
                tpl.set_block("C", &row(&[("C_ID", &format!("{i}.{j}.{k}"))]));
            }
            tpl.set_block("B", &row(&[("B_ID", &format!("{i}.{j}"))]));
        }
        tpl.set_block("A", &row(&[("A_ID", &format!("{i}"))]));
    }

    assert_eq!(
        tpl.render(),
        "<a id=\"0\">\
         <b id=\"0.0\"><c id=\"0.0.0\"/><c id=\"0.0.1\"/></b>\
         <b id=\"0.1\"><c id=\"0.1.0\"/><c id=\"0.1.1\"/></b>\
         </a>\
         <a id=\"1\">\
         <b id=\"1.0\"><c id=\"1.0.0\"/><c id=\"1.0.1\"/></b>\
         <b id=\"1.1\"><c id=\"1.1.0\"/><c id=\"1.1.1\"/></b>\
         </a>"
    );
}

#[test]
fn test_outer_row_consumes_inner_rows() {
    let mut tpl = SimpleTemplate::new();
    tpl.set_content("<!-- BEGIN B -->[<!-- BEGIN C -->{N}<!-- END C -->]<!-- END B -->");

    tpl.set_block("C", &row(&[("N", "1")]));
    tpl.set_block("C", &row(&[("N", "2")]));
    tpl.set_block("B", &HashMap::new());
    // The second outer row starts from a drained inner accumulation.
    tpl.set_block("B", &HashMap::new());

    assert_eq!(tpl.render(), "[12][]");
}

#[test]
fn test_sibling_blocks_emit_at_their_template_position() {
    let mut tpl = SimpleTemplate::new();
    tpl.set_content(
        "<!-- BEGIN FOO -->foo<!-- END FOO --><!-- BEGIN BAR -->bar<!-- END BAR --><!-- BEGIN BAZ -->baz<!-- END BAZ -->",
    );

    // Pushed in reverse of the template order; output follows the template.
    tpl.set_block("BAZ", &HashMap::new());
    tpl.set_block("BAR", &HashMap::new());
    tpl.set_block("FOO", &HashMap::new());

    assert_eq!(tpl.render(), "foobarbaz");
}

#[test]
fn test_inner_rows_see_global_vars() {
    let mut tpl = SimpleTemplate::new();
    tpl.set_content("<!-- BEGIN R -->{PREFIX}{N};<!-- END R -->");
    tpl.set_var("PREFIX", "#");
    tpl.set_block("R", &row(&[("N", "1")]));
    tpl.set_block("R", &row(&[("N", "2")]));

    assert_eq!(tpl.render(), "#1;#2;");
}

#[test]
fn test_message_literal_inside_block() {
    let mut tpl = SimpleTemplate::new();
    tpl.set_content("<!-- BEGIN C --><c{N}>{\"hello\"} {\"world\"}</c><!-- END C -->");
    tpl.set_var("\"hello\"", "bonjour");
    tpl.set_var("\"world\"", "monde");
    for i in 0..3 {
        tpl.set_block("C", &row(&[("N", &i.to_string())]));
    }

    assert_eq!(
        tpl.render(),
        "<c0>bonjour monde</c><c1>bonjour monde</c><c2>bonjour monde</c>"
    );
}
