//! End-to-end resolution of markdown documents.

use cnt_counter::{DirectiveResolver, ReferenceError, Resolution};
use cnt_markdown::{parse, to_html, to_markdown};
use pretty_assertions::assert_eq;

fn resolve(markdown: &str) -> (String, Resolution) {
    let mut tree = parse(markdown);
    let resolution = DirectiveResolver::default().process(&mut tree);
    (to_markdown(&tree), resolution)
}

fn resolve_to_markdown(markdown: &str) -> String {
    resolve(markdown).0
}

#[test]
fn test_reset_then_up_under_subheading() {
    let input = "# test\n\ns1\n:cnt{name=\"fig\" reset}\ns2\n\n## test1\n\n![fig1](/images/fig1.png)\nfig :cnt{name=\"fig\" up}\n";
    assert_eq!(
        resolve_to_markdown(input),
        "# test\n\ns1\n\ns2\n\n## test1\n\n![fig1](/images/fig1.png)\nfig 1\n"
    );
}

#[test]
fn test_independent_counters() {
    let input = "# test\n\n:cnt{name=\"foo\" reset}\n:cnt{name=\"bar\" reset}\n\n:cnt{name=\"foo\" up}\n\n:cnt{name=\"bar\" up}\n\n:cnt{name=\"bar\" up}\n\n:cnt{name=\"bar\" up}\n\n:cnt{name=\"foo\" up}\n";
    assert_eq!(
        resolve_to_markdown(input),
        "# test\n\n\n\n\n1\n\n1\n\n2\n\n3\n\n2\n"
    );
}

#[test]
fn test_up_is_monotonic() {
    let input = "# test\n\n:cnt{name=\"fig\" reset}\n\n:cnt{name=\"fig\" up}\n\n:cnt{name=\"fig\" up}\n";
    assert_eq!(resolve_to_markdown(input), "# test\n\n\n\n1\n\n2\n");
}

#[test]
fn test_reset_container_by_heading_depth() {
    let input = "# test\n\n:::cnt{reset}\n## :cnt{name=\"foo\"}\n## :cnt{name=\"bar\"}\n### :cnt{name=\"bar\"}\n:::\n\n## head2-1\n\n:cnt{name=\"foo\" up}:cnt{name=\"bar\" up}\n\n### head3-1\n\n:cnt{name=\"foo\" up}:cnt{name=\"bar\" up}\n\n## head2-2\n\n:cnt{name=\"foo\" up}:cnt{name=\"bar\" up}\n";
    assert_eq!(
        resolve_to_markdown(input),
        "# test\n\n## head2-1\n\n11\n\n### head3-1\n\n21\n\n## head2-2\n\n11\n"
    );
}

#[test]
fn test_increment_container() {
    let input = "# test\n\n:::cnt{reset}\n# :cnt{name=\"chapter\"}\n:::\n:::cnt{increment}\n## :cnt{name=\"chapter\"}\n:::\n\n## test 1\n\n:cnt{name=\"chapter\"}\n\n### test1-1\n\n:cnt{name=\"chapter\"}\n\n## test2\n\n:cnt{name=\"chapter\"}\n";
    assert_eq!(
        resolve_to_markdown(input),
        "# test\n\n## test 1\n\n1\n\n### test1-1\n\n1\n\n## test2\n\n2\n"
    );
}

#[test]
fn test_look_and_bare_reference() {
    let input = "# test\n\n:cnt{name=\"foo\" reset}\n\n:cnt{name=\"foo\" up}\n\n:cnt{name=\"foo\" look}:cnt{name=\"foo\"}\n\n:cnt{name=\"foo\" up}\n";
    assert_eq!(resolve_to_markdown(input), "# test\n\n\n\n1\n\n11\n\n2\n");
}

#[test]
fn test_undefined_references() {
    let input = "# test\n\n:cnt{name=\"foo\" reset}\n\ns1:cnt{name=\"bar\" up}s2\n\ns3:cnt{name=\"car\" look}s4\n\ns5:cnt{name=\"baz\"}s6\n\n:cnt{name=\"foo\" up}\n";
    let (output, resolution) = resolve(input);

    assert_eq!(
        output,
        "# test\n\n\n\ns1(ReferenceError: \"bar\" is not defined)s2\n\ns3(ReferenceError: \"car\" is not defined)s4\n\ns5(ReferenceError: \"baz\" is not defined)s6\n\n1\n"
    );
    assert_eq!(
        resolution.errors,
        vec![
            ReferenceError::new("bar"),
            ReferenceError::new("car"),
            ReferenceError::new("baz"),
        ]
    );
}

#[test]
fn test_undefined_increment_group() {
    let input = "# test\n\n:::cnt{increment}\n## :cnt{name=\"chapter\"}\n:::\n## test1\n";
    assert_eq!(
        resolve_to_markdown(input),
        "# test\n\n(ReferenceError: \"chapter\" is not defined)\n\n## test1\n"
    );
}

#[test]
fn test_error_name_is_escaped() {
    let input = "# test\n\ns1:cnt{name=\"[bar]\"}s2\n";
    assert_eq!(
        resolve_to_markdown(input),
        "# test\n\ns1(ReferenceError: \"\\[bar]\" is not defined)s2\n"
    );
}

#[test]
fn test_code_blocks_are_not_resolved() {
    let input = "```md\n:cnt{name=\"fig\" up}\n```\n\nUse `:cnt{name=\"fig\"}` inline.\n";
    let (output, resolution) = resolve(input);

    assert_eq!(output, input);
    assert!(resolution.is_clean());
    assert_eq!(resolution.resolved, 0);
}

#[test]
fn test_resolution_is_idempotent() {
    let input = "# test\n\n:::cnt{reset}\n## :cnt{name=\"sec\"}\n:::\n\n## A\n\nSection :cnt{name=\"sec\" up} and :cnt{name=\"nope\"}.\n";
    let mut tree = parse(input);
    let resolver = DirectiveResolver::default();
    resolver.process(&mut tree);

    let resolved = tree.clone();
    let second = resolver.process(&mut tree);

    assert_eq!(tree, resolved);
    assert_eq!(second, Resolution::default());
}

#[test]
fn test_resolved_output_reparses_to_same_markdown() {
    let input = "# test\n\nItem :cnt{name=\"n\" reset=4}:cnt{name=\"n\" up} of *many*.\n";
    let output = resolve_to_markdown(input);

    assert_eq!(output, "# test\n\nItem 5 of *many*.\n");
    assert_eq!(resolve_to_markdown(&output), output);
}

#[test]
fn test_setext_heading_fires_reset() {
    let input = ":::cnt{reset}\n## :cnt{name=\"s\"}\n:::\n\nSection\n-------\n\n:cnt{name=\"s\" up}\n\n:cnt{name=\"s\" up}\n\nOther\n-----\n\n:cnt{name=\"s\" up}\n";
    assert_eq!(
        resolve_to_markdown(input),
        "## Section\n\n1\n\n2\n\n## Other\n\n1\n"
    );
}

#[test]
fn test_blockquoted_heading_fires_reset() {
    let input = ":::cnt{reset}\n## :cnt{name=\"s\"}\n:::\n\n## A\n\n:cnt{name=\"s\" up}\n\n> ## Quoted\n\n:cnt{name=\"s\" up}\n";
    assert_eq!(
        resolve_to_markdown(input),
        "## A\n\n1\n\n> ## Quoted\n\n1\n"
    );
}

#[test]
fn test_lists_and_indented_code_keep_their_layout() {
    let input = ":cnt{name=\"f\" reset=2}\n\n- item\n  - nested :cnt{name=\"f\" up}\n\ntext\n\n    let x = 1;\n";
    assert_eq!(
        resolve_to_markdown(input),
        "\n\n- item\n  - nested 3\n\ntext\n\n    let x = 1;\n"
    );
    assert_eq!(
        resolve_to_markdown("- item\n  - nested\n"),
        "- item\n  - nested\n"
    );
}

#[test]
fn test_counter_opening_paragraph_is_not_a_list() {
    let input = ":cnt{name=\"n\" reset}\n\n:cnt{name=\"n\" up}. Item\n";
    let mut tree = parse(input);
    DirectiveResolver::default().process(&mut tree);

    assert_eq!(to_markdown(&tree), "\n\n1\\. Item\n");
    assert_eq!(to_html(&tree), "<p>1. Item</p>\n");
}
