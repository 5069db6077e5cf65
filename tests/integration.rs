use pretty_assertions::assert_eq;
use tinct::{
    filter_distinct, formats, generate, serialize_css_variables, serialize_tailwind_config,
    ColorList, CssExportOptions, Format, Generator, GeneratorRequest, PaletteType, Rejection,
};

#[test]
fn add_generate_and_export() {
    let mut list = ColorList::new();
    let base = list.add("255, 0, 0").unwrap();
    assert!(matches!(list.add("rgb(255 0 0)"), Err(Rejection::Duplicate { .. })));
    assert!(matches!(list.add("bogus"), Err(Rejection::InvalidSyntax { .. })));

    let base_code = list.get(base).unwrap().code.clone();
    assert_eq!(formats(&base_code).hex, "#ff0000");

    let request =
        GeneratorRequest::new(base_code.as_str(), Generator::Palette(PaletteType::Triadic));
    let generated = generate(&request).unwrap();
    // The base color comes back as hex, which is a different string.
    assert_eq!(list.merge(generated), 3);
    assert_eq!(list.len(), 4);

    list.set_name(base, "primary");
    list.remove(1);
    assert_eq!(list.display_name(base).as_deref(), Some("primary"));

    let codes = list.codes();
    assert_eq!(
        serialize_css_variables(&codes, &CssExportOptions::with_format(Format::Hex)),
        ":root {\n  --color-1: #ff0000;\n  --color-2: #00ff00;\n  --color-3: #0000ff;\n}"
    );
    assert_eq!(
        serialize_tailwind_config(&codes[..1]),
        "module.exports = {\n  theme: {\n    extend: {\n      colors: {\n        color1: \"#ff0000\",\n      },\n    },\n  },\n}"
    );
}

#[test]
fn extracted_colors_join_the_list() {
    let mut list = ColorList::new();
    list.add("#0a0a0a").unwrap();

    let candidates = [[12, 11, 9], [200, 10, 10], [10, 200, 10]];
    let kept = filter_distinct(&candidates, &list.codes(), 30.0);
    assert_eq!(list.merge(kept), 2);
    assert_eq!(
        list.iter().map(|e| e.code.to_string()).collect::<Vec<_>>(),
        ["#0a0a0a", "#c80a0a", "#0ac80a"]
    );
}
