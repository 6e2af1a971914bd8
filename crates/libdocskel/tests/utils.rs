// Dead code detection breaks here, because the integration test crates all use a disjoint set of
// the pub items.
#![allow(dead_code)]

use std::{fs, path::Path};

use libdocskel::Docskel;
use tempfile::TempDir;

/// A documentation tree written into a temporary directory.
pub struct Tree {
    dir: TempDir,
}

impl Tree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    /// Write raw `bytes` to `relative`, for pages in a non-UTF-8 encoding.
    pub fn write_bytes(&self, relative: &str, bytes: &[u8]) -> &Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, bytes).unwrap();
        self
    }
}

/// A facade with frontmatter off, so rendered output is just the stubs.
pub fn docskel() -> Docskel {
    Docskel::new().with_frontmatter(false)
}

/// Trim trailing whitespace, drop blank lines and dedent, so expectations can be indented.
pub fn normalize_whitespace(s: &str) -> String {
    let lines: Vec<&str> = s
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect();
    let min_indent = lines
        .iter()
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    lines
        .into_iter()
        .map(|line| &line[min_indent..])
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the tree at `root` and compare against `expected`, ignoring blank lines and indent.
pub fn assert_renders(root: &Path, expected: &str) {
    let rendered = docskel().render(root).unwrap();
    pretty_assertions::assert_eq!(
        normalize_whitespace(&rendered),
        normalize_whitespace(expected)
    );
}

/// Stubs for the two-type scenario, as every format should render them.
pub const EXPECTED_STUBS: &str = r#"
    package p;

    /**
     * An interface.
     */
    public interface A {
        /**
         * Returns a B.
         * @return a new B
         */
        p.B m();
    }

    package p;

    /**
     * A class.
     */
    public class B implements p.A {
        /**
         * The maximum.
         */
        public static final int MAX = 10;

        public static final java.lang.String NAME = "bee";

        /**
         * Creates a B.
         */
        public B() {
            throw new UnsupportedOperationException();
        }

        public p.B m() {
            throw new UnsupportedOperationException();
        }

        /**
         * Runs.
         * @param count how many
         * @param names the names
         * @throws IOException on failure
         */
        public void run(int count, java.lang.String... names) throws java.io.IOException {
            throw new UnsupportedOperationException();
        }
    }
"#;

// ---------------------------------------------------------------------------------------------
// Generator 8 layout
// ---------------------------------------------------------------------------------------------

pub const JDK8_MARKER: &str =
    "<!-- Generated by javadoc (1.8.0_181) on Mon Jan 01 00:00:00 UTC 2018 -->";

const JDK8_STRING: &str = r#"<a href="https://docs.oracle.com/javase/8/docs/api/java/lang/String.html?is-external=true" title="class or interface in java.lang">String</a>"#;

const JDK8_IOEXCEPTION: &str = r#"<a href="https://docs.oracle.com/javase/8/docs/api/java/io/IOException.html?is-external=true" title="class or interface in java.io">IOException</a>"#;

/// An all-types index listing `(href, title, text)` entries.
pub fn jdk8_index(entries: &[(&str, &str, &str)]) -> String {
    let items: String = entries
        .iter()
        .map(|(href, title, text)| {
            format!(r#"<li><a href="{href}" title="{title}" target="classFrame">{text}</a></li>"#)
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">
<html lang="en">
<head>
{JDK8_MARKER}
<title>All Classes</title>
</head>
<body>
<h1 class="bar">All Classes</h1>
<div class="indexContainer">
<ul>
{items}
</ul>
</div>
</body>
</html>"#
    )
}

/// A type page: `title` is the header text (`Interface A`), `declaration` the inner HTML of the
/// declaration `pre`.
pub fn jdk8_type_page(
    title: &str,
    declaration: &str,
    comment: &str,
    summary: &str,
    details: &str,
) -> String {
    format!(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">
<html lang="en">
<head>
{JDK8_MARKER}
<title>{title}</title>
</head>
<body>
<div class="header">
<div class="subTitle">p</div>
<h2 title="{title}" class="title">{title}</h2>
</div>
<div class="contentContainer">
<div class="description">
<ul class="blockList">
<li class="blockList">
<hr>
<br>
<pre>{declaration}</pre>
{comment}
</li>
</ul>
</div>
<div class="summary">
<ul class="blockList">
<li class="blockList">
{summary}
</li>
</ul>
</div>
<div class="details">
<ul class="blockList">
<li class="blockList">
{details}
</li>
</ul>
</div>
</div>
</body>
</html>"#
    )
}

/// A section container opened by a dotted anchor such as `method.summary`.
pub fn jdk8_section(anchor: &str, heading: &str, body: &str) -> String {
    format!(
        r#"<!-- =========== {heading} =========== -->
<ul class="blockList">
<li class="blockList"><a name="{anchor}">
<!--   -->
</a>
<h3>{heading}</h3>
{body}
</li>
</ul>"#
    )
}

/// A summary table with a header row followed by `rows`.
pub fn jdk8_table(rows: &[String]) -> String {
    format!(
        r#"<table class="memberSummary" border="0" cellpadding="3" cellspacing="0">
<tr>
<th class="colFirst" scope="col">Modifier and Type</th>
<th class="colLast" scope="col">Member and Description</th>
</tr>
{}
</table>"#,
        rows.join("\n")
    )
}

/// A two-cell summary row.
pub fn jdk8_row(type_cell: &str, member_cell: &str) -> String {
    format!(
        r#"<tr class="altColor">
<td class="colFirst"><code>{type_cell}</code></td>
<td class="colLast">{member_cell}</td>
</tr>"#
    )
}

/// A member detail block.
pub fn jdk8_detail(anchor: &str, heading: &str, signature: &str, notes: &str) -> String {
    format!(
        r#"<a name="{anchor}">
<!--   -->
</a>
<ul class="blockList">
<li class="blockList">
<h4>{heading}</h4>
<pre>{signature}</pre>
{notes}
</li>
</ul>"#
    )
}

pub fn jdk8_a_page() -> String {
    jdk8_type_page(
        "Interface A",
        r#"public interface <span class="typeNameLabel">A</span>"#,
        r#"<div class="block">An interface.</div>"#,
        &jdk8_section(
            "method.summary",
            "Method Summary",
            &jdk8_table(&[jdk8_row(
                r#"<a href="B.html" title="class in p">B</a>"#,
                r#"<code><span class="memberNameLink"><a href="A.html#m--">m</a></span>()</code>
<div class="block">Returns a B.</div>"#,
            )]),
        ),
        &jdk8_section(
            "method.detail",
            "Method Detail",
            &jdk8_detail(
                "m--",
                "m",
                r#"<a href="B.html" title="class in p">B</a>&nbsp;m()"#,
                r#"<div class="block">Returns a B.</div>
<dl>
<dt><span class="returnLabel">Returns:</span></dt>
<dd>a new B</dd>
</dl>"#,
            ),
        ),
    )
}

pub fn jdk8_b_page() -> String {
    let fields = jdk8_section(
        "field.summary",
        "Field Summary",
        &jdk8_table(&[
            jdk8_row(
                "static int",
                r#"<code><span class="memberNameLink"><a href="B.html#MAX">MAX</a></span></code>
<div class="block">The maximum.</div>"#,
            ),
            jdk8_row(
                &format!("static {JDK8_STRING}"),
                r#"<code><span class="memberNameLink"><a href="B.html#NAME">NAME</a></span></code>&nbsp;"#,
            ),
        ]),
    );
    let constructors = jdk8_section(
        "constructor.summary",
        "Constructor Summary",
        r#"<table class="memberSummary" border="0" cellpadding="3" cellspacing="0">
<tr>
<th class="colOne" scope="col">Constructor and Description</th>
</tr>
<tr class="altColor">
<td class="colOne"><code><span class="memberNameLink"><a href="B.html#B--">B</a></span>()</code>
<div class="block">Creates a B.</div>
</td>
</tr>
</table>"#,
    );
    let methods = jdk8_section(
        "method.summary",
        "Method Summary",
        &jdk8_table(&[
            jdk8_row(
                r#"<a href="B.html" title="class in p">B</a>"#,
                r#"<code><span class="memberNameLink"><a href="B.html#m--">m</a></span>()</code>"#,
            ),
            jdk8_row(
                "void",
                &format!(
                    r#"<code><span class="memberNameLink"><a href="B.html#run-int-java.lang.String...-">run</a></span>(int&nbsp;count,
   {JDK8_STRING}...&nbsp;names)</code>
<div class="block">Runs.</div>"#
                ),
            ),
        ]),
    );

    let field_details = jdk8_section(
        "field.detail",
        "Field Detail",
        &[
            jdk8_detail(
                "MAX",
                "MAX",
                "public static final&nbsp;int MAX",
                r#"<div class="block">The maximum.</div>"#,
            ),
            jdk8_detail(
                "NAME",
                "NAME",
                &format!("public static final&nbsp;{JDK8_STRING} NAME"),
                "",
            ),
        ]
        .join("\n"),
    );
    let constructor_details = jdk8_section(
        "constructor.detail",
        "Constructor Detail",
        &jdk8_detail(
            "B--",
            "B",
            "public&nbsp;B()",
            r#"<div class="block">Creates a B.</div>"#,
        ),
    );
    let method_details = jdk8_section(
        "method.detail",
        "Method Detail",
        &[
            jdk8_detail(
                "m--",
                "m",
                r#"public&nbsp;<a href="B.html" title="class in p">B</a>&nbsp;m()"#,
                "",
            ),
            jdk8_detail(
                "run-int-java.lang.String...-",
                "run",
                &format!(
                    "public&nbsp;void&nbsp;run(int&nbsp;count,\n                {JDK8_STRING}...&nbsp;names)\n         throws {JDK8_IOEXCEPTION}"
                ),
                &format!(
                    r#"<div class="block">Runs.</div>
<dl>
<dt><span class="paramLabel">Parameters:</span></dt>
<dd><code>count</code> - how many</dd>
<dd><code>names</code> - the names</dd>
<dt><span class="throwsLabel">Throws:</span></dt>
<dd><code>{JDK8_IOEXCEPTION}</code> - on failure</dd>
</dl>"#
                ),
            ),
        ]
        .join("\n"),
    );

    jdk8_type_page(
        "Class B",
        r#"public class <span class="typeNameLabel">B</span>
extends java.lang.Object
implements <a href="A.html" title="interface in p">A</a>"#,
        r#"<div class="block">A class.</div>"#,
        &[fields, constructors, methods].join("\n"),
        &[field_details, constructor_details, method_details].join("\n"),
    )
}

/// A constant values page; `rows` are `(type_name_path, declared, field, literal)`.
pub fn jdk8_constants(rows: &[(&str, &str, &str, &str)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(page, declared, field, literal)| {
            format!(
                r#"<tr class="altColor">
<td class="colFirst"><a name="{field}">
<!--   -->
</a><code>public&nbsp;static&nbsp;final&nbsp;{declared}</code></td>
<td><code><a href="{page}#{field}">{field}</a></code></td>
<td class="colLast"><code>{literal}</code></td>
</tr>"#
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">
<html lang="en">
<head>
{JDK8_MARKER}
<title>Constant Field Values</title>
</head>
<body>
<div class="header">
<h1 title="Constant Field Values" class="title">Constant Field Values</h1>
</div>
<div class="constantValuesContainer"><a name="p">
<!--   -->
</a>
<h2 title="p">p.*</h2>
<ul class="blockList">
<li class="blockList">
<table class="constantsSummary" border="0" cellpadding="3" cellspacing="0">
<caption><span>p.<a href="p/B.html" title="class in p">B</a></span></caption>
<tr>
<th class="colFirst" scope="col">Modifier and Type</th>
<th scope="col">Constant Field</th>
<th class="colLast" scope="col">Value</th>
</tr>
{rows}
</table>
</li>
</ul>
</div>
</body>
</html>"#
    )
}

/// The two-type scenario in the generator 8 layout, with constants.
pub fn jdk8_tree() -> Tree {
    let tree = Tree::new();
    tree.write(
        "allclasses-noframe.html",
        &jdk8_index(&[
            ("p/A.html", "interface in p", r#"<span class="interfaceName">A</span>"#),
            ("p/B.html", "class in p", "B"),
        ]),
    )
    .write("p/A.html", &jdk8_a_page())
    .write("p/B.html", &jdk8_b_page())
    .write(
        "constant-values.html",
        &jdk8_constants(&[
            ("p/B.html", "int", "MAX", "10"),
            ("p/B.html", "java.lang.String", "NAME", "\"bee\""),
        ]),
    );
    tree
}

/// `enum Color { RED, GREEN }`, with the compiler-generated `values` and `valueOf` documented.
pub fn jdk8_color_page() -> String {
    let color = r#"<a href="Color.html" title="enum in p">Color</a>"#;
    let constants = jdk8_section(
        "enum.constant.summary",
        "Enum Constant Summary",
        r#"<table class="memberSummary" border="0" cellpadding="3" cellspacing="0">
<tr>
<th class="colOne" scope="col">Enum Constant and Description</th>
</tr>
<tr class="altColor">
<td class="colOne"><code><span class="memberNameLink"><a href="Color.html#RED">RED</a></span></code>
<div class="block">Red.</div>
</td>
</tr>
<tr class="rowColor">
<td class="colOne"><code><span class="memberNameLink"><a href="Color.html#GREEN">GREEN</a></span></code>&nbsp;</td>
</tr>
</table>"#,
    );
    let methods = jdk8_section(
        "method.summary",
        "Method Summary",
        &jdk8_table(&[
            jdk8_row(
                &format!("static {color}[]"),
                r#"<code><span class="memberNameLink"><a href="Color.html#values--">values</a></span>()</code>"#,
            ),
            jdk8_row(
                &format!("static {color}"),
                &format!(
                    r#"<code><span class="memberNameLink"><a href="Color.html#valueOf-java.lang.String-">valueOf</a></span>({JDK8_STRING}&nbsp;name)</code>"#
                ),
            ),
        ]),
    );
    let constant_details = jdk8_section(
        "enum.constant.detail",
        "Enum Constant Detail",
        &[
            jdk8_detail(
                "RED",
                "RED",
                &format!("public static final&nbsp;{color} RED"),
                r#"<div class="block">Red.</div>"#,
            ),
            jdk8_detail(
                "GREEN",
                "GREEN",
                &format!("public static final&nbsp;{color} GREEN"),
                "",
            ),
        ]
        .join("\n"),
    );
    jdk8_type_page(
        "Enum Color",
        &format!(
            "public enum <span class=\"typeNameLabel\">Color</span>\nextends java.lang.Enum&lt;{color}&gt;"
        ),
        r#"<div class="block">Colors.</div>"#,
        &[constants, methods].join("\n"),
        &constant_details,
    )
}

/// `@interface Tag { String name(); int count() default 0; }`.
pub fn jdk8_tag_page() -> String {
    let required = jdk8_section(
        "annotation.type.required.element.summary",
        "Required Element Summary",
        &jdk8_table(&[jdk8_row(
            JDK8_STRING,
            r#"<code><span class="memberNameLink"><a href="Tag.html#name--">name</a></span></code>"#,
        )]),
    );
    let optional = jdk8_section(
        "annotation.type.optional.element.summary",
        "Optional Element Summary",
        &jdk8_table(&[jdk8_row(
            "int",
            r#"<code><span class="memberNameLink"><a href="Tag.html#count--">count</a></span></code>
<div class="block">How many.</div>"#,
        )]),
    );
    let details = jdk8_section(
        "annotation.type.element.detail",
        "Element Detail",
        &[
            jdk8_detail(
                "name--",
                "name",
                &format!("public abstract&nbsp;{JDK8_STRING}&nbsp;name"),
                "",
            ),
            jdk8_detail(
                "count--",
                "count",
                "public abstract&nbsp;int&nbsp;count",
                r#"<div class="block">How many.</div>
<dl>
<dt>Default:</dt>
<dd>0</dd>
</dl>"#,
            ),
        ]
        .join("\n"),
    );
    jdk8_type_page(
        "Annotation Type Tag",
        r#"public @interface <span class="typeNameLabel">Tag</span>"#,
        r#"<div class="block">A marker.</div>"#,
        &[required, optional].join("\n"),
        &details,
    )
}

/// A type variable reference as the generator links it.
const JDK8_TYPE_VAR_T: &str = r#"<a href="Graph.html" title="type parameter in Graph">T</a>"#;

/// `class Graph<T> { T root(); }`.
pub fn jdk8_graph_page() -> String {
    jdk8_type_page(
        "Class Graph&lt;T&gt;",
        "public class <span class=\"typeNameLabel\">Graph&lt;T&gt;</span>\nextends java.lang.Object",
        r#"<div class="block">A graph.</div>"#,
        &jdk8_section(
            "method.summary",
            "Method Summary",
            &jdk8_table(&[jdk8_row(
                JDK8_TYPE_VAR_T,
                r#"<code><span class="memberNameLink"><a href="Graph.html#root--">root</a></span>()</code>"#,
            )]),
        ),
        &jdk8_section(
            "method.detail",
            "Method Detail",
            &jdk8_detail(
                "root--",
                "root",
                &format!("public&nbsp;{JDK8_TYPE_VAR_T}&nbsp;root()"),
                "",
            ),
        ),
    )
}

/// The inner class `Graph<T>.Node`, whose members use the enclosing type variable.
pub fn jdk8_graph_node_page() -> String {
    jdk8_type_page(
        "Class Graph.Node",
        "public class <span class=\"typeNameLabel\">Graph.Node</span>\nextends java.lang.Object",
        "",
        &jdk8_section(
            "method.summary",
            "Method Summary",
            &jdk8_table(&[jdk8_row(
                JDK8_TYPE_VAR_T,
                r#"<code><span class="memberNameLink"><a href="Graph.Node.html#value--">value</a></span>()</code>"#,
            )]),
        ),
        &jdk8_section(
            "method.detail",
            "Method Detail",
            &jdk8_detail(
                "value--",
                "value",
                &format!("public&nbsp;{JDK8_TYPE_VAR_T}&nbsp;value()"),
                "",
            ),
        ),
    )
}

/// The two-type scenario plus an enum, an annotation and a generic class with an inner class.
pub fn jdk8_kinds_tree() -> Tree {
    let tree = jdk8_tree();
    tree.write(
        "allclasses-noframe.html",
        &jdk8_index(&[
            ("p/A.html", "interface in p", r#"<span class="interfaceName">A</span>"#),
            ("p/B.html", "class in p", "B"),
            ("p/Color.html", "enum in p", "Color"),
            ("p/Graph.html", "class in p", "Graph"),
            ("p/Graph.Node.html", "class in p", "Graph.Node"),
            ("p/Tag.html", "annotation in p", "Tag"),
        ]),
    )
    .write("p/Color.html", &jdk8_color_page())
    .write("p/Graph.html", &jdk8_graph_page())
    .write("p/Graph.Node.html", &jdk8_graph_node_page())
    .write("p/Tag.html", &jdk8_tag_page());
    tree
}

// ---------------------------------------------------------------------------------------------
// Generators 11 and 12
// ---------------------------------------------------------------------------------------------

/// The two-type scenario as generator 11 writes it: a frameless `allclasses.html` index, and
/// headers whose kind keyword survives only in the `title` attribute.
pub fn jdk11_tree() -> Tree {
    let tree = Tree::new();
    let index = jdk8_index(&[
        ("p/A.html", "interface in p", r#"<span class="interfaceName">A</span>"#),
        ("p/B.html", "class in p", "B"),
    ])
    .replace("1.8.0_181", "11.0.2");
    tree.write("allclasses.html", &index)
        .write(
            "p/A.html",
            &jdk8_a_page().replace(r#"class="title">Interface A</h2>"#, r#"class="title">A</h2>"#),
        )
        .write(
            "p/B.html",
            &jdk8_b_page().replace(r#"class="title">Class B</h2>"#, r#"class="title">B</h2>"#),
        )
        .write(
            "constant-values.html",
            &jdk8_constants(&[
                ("p/B.html", "int", "MAX", "10"),
                ("p/B.html", "java.lang.String", "NAME", "\"bee\""),
            ]),
        );
    tree
}

/// The generator 12 all-types index: a table in `allclasses-index.html`.
pub fn jdk12_index() -> String {
    r#"<!DOCTYPE HTML>
<html lang="en">
<head>
<!-- Generated by javadoc (12.0.1) on Mon Jan 01 00:00:00 UTC 2019 -->
<title>All Classes</title>
</head>
<body>
<main role="main">
<div class="header">
<h1 title="All Classes" class="title">All Classes</h1>
</div>
<div class="allClassesContainer">
<ul class="blockList">
<li class="blockList">
<table class="typeSummary">
<tr>
<th class="colFirst" scope="col">Class</th>
<th class="colLast" scope="col">Description</th>
</tr>
<tr class="altColor" id="i0">
<td class="colFirst"><a href="p/A.html" title="interface in p">A</a></td>
<th class="colLast" scope="row">
<div class="block">An interface.</div>
</th>
</tr>
<tr class="rowColor" id="i1">
<td class="colFirst"><a href="p/B.html" title="class in p">B</a></td>
<th class="colLast" scope="row">
<div class="block">A class.</div>
</th>
</tr>
</table>
</li>
</ul>
</div>
</main>
</body>
</html>"#
        .to_string()
}

/// The two-type scenario indexed by `allclasses-index.html` alone.
pub fn jdk12_tree() -> Tree {
    let tree = Tree::new();
    tree.write("allclasses-index.html", &jdk12_index())
        .write("p/A.html", &jdk8_a_page())
        .write("p/B.html", &jdk8_b_page())
        .write(
            "constant-values.html",
            &jdk8_constants(&[
                ("p/B.html", "int", "MAX", "10"),
                ("p/B.html", "java.lang.String", "NAME", "\"bee\""),
            ]),
        );
    tree
}

// ---------------------------------------------------------------------------------------------
// Generator 17 layout
// ---------------------------------------------------------------------------------------------

pub const JDK17_MARKER: &str = "<!-- Generated by javadoc (17) on Mon Jan 01 00:00:00 UTC 2024 -->";

const JDK17_STRING: &str = r#"<a href="https://docs.oracle.com/en/java/javase/17/docs/api/java.base/java/lang/String.html" title="class or interface in java.lang" class="external-link">String</a>"#;

const JDK17_IOEXCEPTION: &str = r#"<a href="https://docs.oracle.com/en/java/javase/17/docs/api/java.base/java/io/IOException.html" title="class or interface in java.io" class="external-link">IOException</a>"#;

fn jdk17_document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE HTML>
<html lang="en">
<head>
{JDK17_MARKER}
<title>{title}</title>
</head>
<body class="class-declaration-page">
<div class="flex-box">
<div class="flex-content">
<main role="main">
{body}
</main>
</div>
</div>
</body>
</html>"#
    )
}

/// A grid of `cells`, each `(class, html)`, preceded by header cells.
fn jdk17_grid(columns: &str, headers: &[&str], cells: &[(&str, String)]) -> String {
    let headers: String = headers
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            let position = if idx + 1 == headers.len() {
                "col-last"
            } else if idx == 0 {
                "col-first"
            } else {
                "col-second"
            };
            format!(r#"<div class="table-header {position}">{text}</div>"#)
        })
        .collect::<Vec<_>>()
        .join("\n");
    let cells: String = cells
        .iter()
        .map(|(class, html)| format!(r#"<div class="{class} even-row-color">{html}</div>"#))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"<div class="summary-table {columns}">
{headers}
{cells}
</div>"#
    )
}

fn jdk17_section(class: &str, id: &str, heading: &str, body: &str) -> String {
    format!(
        r#"<li>
<section class="{class}" id="{id}">
<h2>{heading}</h2>
{body}
</section>
</li>"#
    )
}

fn jdk17_detail(id: &str, heading: &str, signature: &str, notes: &str) -> String {
    format!(
        r#"<li>
<section class="detail" id="{id}">
<h3>{heading}</h3>
<div class="member-signature">{signature}</div>
{notes}
</section>
</li>"#
    )
}

fn jdk17_type_page(
    title: &str,
    declaration: &str,
    comment: &str,
    summary: &str,
    details: &str,
) -> String {
    jdk17_document(
        title,
        &format!(
            r#"<div class="header">
<div class="sub-title"><span class="package-label-in-type">Package</span>&nbsp;<a href="package-summary.html">p</a></div>
<h1 title="{title}" class="title">{title}</h1>
</div>
<section class="class-description" id="class-description">
<hr>
<div class="type-signature">{declaration}</div>
{comment}
</section>
<section class="summary">
<ul class="summary-list">
{summary}
</ul>
</section>
<section class="details">
<ul class="details-list">
{details}
</ul>
</section>"#
        ),
    )
}

pub fn jdk17_a_page() -> String {
    jdk17_type_page(
        "Interface A",
        r#"<span class="modifiers">public interface </span><span class="element-name type-name-label">A</span>"#,
        r#"<div class="block">An interface.</div>"#,
        &jdk17_section(
            "method-summary",
            "method-summary",
            "Method Summary",
            &jdk17_grid(
                "three-column-summary",
                &["Modifier and Type", "Method", "Description"],
                &[
                    (
                        "col-first",
                        r#"<code><a href="B.html" title="class in p">B</a></code>"#.to_string(),
                    ),
                    (
                        "col-second",
                        r##"<code><a href="#m()" class="member-name-link">m</a>()</code>"##
                            .to_string(),
                    ),
                    (
                        "col-last",
                        r#"<div class="block">Returns a B.</div>"#.to_string(),
                    ),
                ],
            ),
        ),
        &jdk17_section(
            "method-details",
            "method-detail",
            "Method Details",
            &format!(
                r#"<ul class="member-list">
{}
</ul>"#,
                jdk17_detail(
                    "m()",
                    "m",
                    r#"<span class="return-type"><a href="B.html" title="class in p">B</a></span>&nbsp;<span class="element-name">m</span>()"#,
                    r#"<div class="block">Returns a B.</div>
<dl class="notes">
<dt>Returns:</dt>
<dd>a new B</dd>
</dl>"#,
                )
            ),
        ),
    )
}

pub fn jdk17_b_page() -> String {
    let fields = jdk17_section(
        "field-summary",
        "field-summary",
        "Field Summary",
        &jdk17_grid(
            "three-column-summary",
            &["Modifier and Type", "Field", "Description"],
            &[
                ("col-first", "<code>static final int</code>".to_string()),
                (
                    "col-second",
                    r##"<code><a href="#MAX" class="member-name-link">MAX</a></code>"##
                        .to_string(),
                ),
                (
                    "col-last",
                    r#"<div class="block">The maximum.</div>"#.to_string(),
                ),
                (
                    "col-first",
                    format!("<code>static final {JDK17_STRING}</code>"),
                ),
                (
                    "col-second",
                    r##"<code><a href="#NAME" class="member-name-link">NAME</a></code>"##
                        .to_string(),
                ),
                ("col-last", "&nbsp;".to_string()),
            ],
        ),
    );
    let constructors = jdk17_section(
        "constructor-summary",
        "constructor-summary",
        "Constructor Summary",
        &jdk17_grid(
            "two-column-summary",
            &["Constructor", "Description"],
            &[
                (
                    "col-constructor-name",
                    r##"<code><a href="#%3Cinit%3E()" class="member-name-link">B</a>()</code>"##
                        .to_string(),
                ),
                (
                    "col-last",
                    r#"<div class="block">Creates a B.</div>"#.to_string(),
                ),
            ],
        ),
    );
    let methods = jdk17_section(
        "method-summary",
        "method-summary",
        "Method Summary",
        &jdk17_grid(
            "three-column-summary",
            &["Modifier and Type", "Method", "Description"],
            &[
                (
                    "col-first",
                    r#"<code><a href="B.html" title="class in p">B</a></code>"#.to_string(),
                ),
                (
                    "col-second",
                    r##"<code><a href="#m()" class="member-name-link">m</a>()</code>"##
                        .to_string(),
                ),
                ("col-last", "&nbsp;".to_string()),
                ("col-first", "<code>void</code>".to_string()),
                (
                    "col-second",
                    format!(
                        r##"<code><a href="#run(int,java.lang.String...)" class="member-name-link">run</a><wbr>(int&nbsp;count,
 {JDK17_STRING}...&nbsp;names)</code>"##
                    ),
                ),
                (
                    "col-last",
                    r#"<div class="block">Runs.</div>"#.to_string(),
                ),
            ],
        ),
    );

    let member_list = |items: Vec<String>| {
        format!(
            r#"<ul class="member-list">
{}
</ul>"#,
            items.join("\n")
        )
    };
    let field_details = jdk17_section(
        "field-details",
        "field-detail",
        "Field Details",
        &member_list(vec![
            jdk17_detail(
                "MAX",
                "MAX",
                r#"<span class="modifiers">public static final</span>&nbsp;<span class="return-type">int</span>&nbsp;<span class="element-name">MAX</span>"#,
                r#"<div class="block">The maximum.</div>"#,
            ),
            jdk17_detail(
                "NAME",
                "NAME",
                &format!(
                    r#"<span class="modifiers">public static final</span>&nbsp;<span class="return-type">{JDK17_STRING}</span>&nbsp;<span class="element-name">NAME</span>"#
                ),
                "",
            ),
        ]),
    );
    let constructor_details = jdk17_section(
        "constructor-details",
        "constructor-detail",
        "Constructor Details",
        &member_list(vec![jdk17_detail(
            "&lt;init&gt;()",
            "B",
            r#"<span class="modifiers">public</span>&nbsp;<span class="element-name">B</span>()"#,
            r#"<div class="block">Creates a B.</div>"#,
        )]),
    );
    let method_details = jdk17_section(
        "method-details",
        "method-detail",
        "Method Details",
        &member_list(vec![
            jdk17_detail(
                "m()",
                "m",
                r#"<span class="modifiers">public</span>&nbsp;<span class="return-type"><a href="B.html" title="class in p">B</a></span>&nbsp;<span class="element-name">m</span>()"#,
                "",
            ),
            jdk17_detail(
                "run(int,java.lang.String...)",
                "run",
                &format!(
                    r#"<span class="modifiers">public</span>&nbsp;<span class="return-type">void</span>&nbsp;<span class="element-name">run</span><wbr><span class="parameters">(int&nbsp;count,
 {JDK17_STRING}...&nbsp;names)</span>
                throws <span class="exceptions">{JDK17_IOEXCEPTION}</span>"#
                ),
                &format!(
                    r#"<div class="block">Runs.</div>
<dl class="notes">
<dt>Parameters:</dt>
<dd><code>count</code> - how many</dd>
<dd><code>names</code> - the names</dd>
<dt>Throws:</dt>
<dd><code>{JDK17_IOEXCEPTION}</code> - on failure</dd>
</dl>"#
                ),
            ),
        ]),
    );

    jdk17_type_page(
        "Class B",
        r#"<span class="modifiers">public class </span><span class="element-name type-name-label">B</span>
<span class="extends-implements">extends <a href="https://docs.oracle.com/en/java/javase/17/docs/api/java.base/java/lang/Object.html" title="class or interface in java.lang" class="external-link">Object</a>
implements <a href="A.html" title="interface in p">A</a></span>"#,
        r#"<div class="block">A class.</div>"#,
        &[fields, constructors, methods].join("\n"),
        &[field_details, constructor_details, method_details].join("\n"),
    )
}

pub fn jdk17_index() -> String {
    jdk17_document(
        "All Classes and Interfaces",
        &jdk17_grid(
            "two-column-summary",
            &["Class", "Description"],
            &[
                (
                    "col-first all-classes-table",
                    r#"<a href="p/A.html" title="interface in p">A</a>"#.to_string(),
                ),
                (
                    "col-last all-classes-table",
                    r#"<div class="block">An interface.</div>"#.to_string(),
                ),
                (
                    "col-first all-classes-table",
                    r#"<a href="p/B.html" title="class in p">B</a>"#.to_string(),
                ),
                (
                    "col-last all-classes-table",
                    r#"<div class="block">A class.</div>"#.to_string(),
                ),
            ],
        ),
    )
}

pub fn jdk17_constants() -> String {
    jdk17_document(
        "Constant Field Values",
        &format!(
            r#"<section class="constants-summary" id="p">
<h2 title="p">p.*</h2>
<ul class="block-list">
<li>
<div class="caption"><span>p.<a href="p/B.html" title="class in p">B</a></span></div>
{}
</li>
</ul>
</section>"#,
            jdk17_grid(
                "three-column-summary",
                &["Modifier and Type", "Constant Field", "Value"],
                &[
                    (
                        "col-first",
                        r#"<code id="p.B.MAX">public&nbsp;static&nbsp;final&nbsp;int</code>"#
                            .to_string(),
                    ),
                    (
                        "col-second",
                        r#"<code><a href="p/B.html#MAX">MAX</a></code>"#.to_string(),
                    ),
                    ("col-last", "<code>10</code>".to_string()),
                    (
                        "col-first",
                        format!(
                            r#"<code id="p.B.NAME">public&nbsp;static&nbsp;final&nbsp;{JDK17_STRING}</code>"#
                        ),
                    ),
                    (
                        "col-second",
                        r#"<code><a href="p/B.html#NAME">NAME</a></code>"#.to_string(),
                    ),
                    ("col-last", "<code>\"bee\"</code>".to_string()),
                ],
            )
        ),
    )
}

/// The two-type scenario in the generator 17 layout.
pub fn jdk17_tree() -> Tree {
    let tree = Tree::new();
    tree.write("allclasses-index.html", &jdk17_index())
        .write("p/A.html", &jdk17_a_page())
        .write("p/B.html", &jdk17_b_page())
        .write("constant-values.html", &jdk17_constants());
    tree
}

// ---------------------------------------------------------------------------------------------
// Generator 1.5 layout
// ---------------------------------------------------------------------------------------------

pub const LEGACY_MARKER: &str =
    "<!-- Generated by javadoc (build 1.5.0_22) on Mon Jan 01 00:00:00 UTC 2007 -->";

fn legacy_document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">
<HTML>
<HEAD>
{LEGACY_MARKER}
<TITLE>
{title}
</TITLE>
</HEAD>
<BODY BGCOLOR="white">
{body}
</BODY>
</HTML>"#
    )
}

pub fn legacy_index() -> String {
    legacy_document(
        "All Classes",
        r#"<FONT size="+1" CLASS="FrameHeadingFont">
<B>All Classes</B></FONT>
<BR>
<TABLE BORDER="0" WIDTH="100%" SUMMARY="">
<TR>
<TD NOWRAP><FONT CLASS="FrameItemFont"><A HREF="p/A.html" title="interface in p" target="classFrame"><I>A</I></A>
<BR>
<A HREF="p/B.html" title="class in p" target="classFrame">B</A>
<BR>
</FONT></TD>
</TR>
</TABLE>"#,
    )
}

pub fn legacy_a_page() -> String {
    legacy_document(
        "A",
        r##"<!-- ======== START OF CLASS DATA ======== -->
<H2>
<FONT SIZE="-1">
p</FONT>
<BR>
Interface A</H2>
<HR>
<DL>
<DT><PRE>public interface <B>A</B></PRE>
</DL>
<P>
An interface.
<P>

<P>
<HR>

<!-- ========== METHOD SUMMARY =========== -->

<A NAME="method_summary"><!-- --></A>
<TABLE BORDER="1" WIDTH="100%" CELLPADDING="3" CELLSPACING="0" SUMMARY="">
<TR BGCOLOR="#CCCCFF" CLASS="TableHeadingColor">
<TH ALIGN="left" COLSPAN="2"><FONT SIZE="+2">
<B>Method Summary</B></FONT></TH>
</TR>
<TR BGCOLOR="white" CLASS="TableRowColor">
<TD ALIGN="right" VALIGN="top" WIDTH="1%"><FONT SIZE="-1">
<CODE>&nbsp;<A HREF="../p/B.html" title="class in p">B</A></CODE></FONT></TD>
<TD><CODE><B><A HREF="../p/A.html#m()">m</A></B>()</CODE>

<BR>
&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;Returns a B.</TD>
</TR>
</TABLE>
&nbsp;
<P>

<!-- ============ METHOD DETAIL ========== -->

<A NAME="method_detail"><!-- --></A>
<TABLE BORDER="1" WIDTH="100%" CELLPADDING="3" CELLSPACING="0" SUMMARY="">
<TR BGCOLOR="#CCCCFF" CLASS="TableHeadingColor">
<TH ALIGN="left" COLSPAN="1"><FONT SIZE="+2">
<B>Method Detail</B></FONT></TH>
</TR>
</TABLE>

<A NAME="m()"><!-- --></A><H3>
m</H3>
<PRE>
<A HREF="../p/B.html" title="class in p">B</A> <B>m</B>()</PRE>
<DL>
<DD>Returns a B.
<P>
<DD><DL>

<DT><B>Returns:</B><DD>a new B</DL>
</DD>
</DL>
<!-- ========= END OF CLASS DATA ========= -->
<HR>"##,
    )
}

pub fn legacy_b_page() -> String {
    legacy_document(
        "B",
        r##"<!-- ======== START OF CLASS DATA ======== -->
<H2>
<FONT SIZE="-1">
p</FONT>
<BR>
Class B</H2>
<HR>
<DL>
<DT><PRE>public class <B>B</B>
extends java.lang.Object
implements <A HREF="../p/A.html" title="interface in p">A</A></PRE>
</DL>
<P>
A class.
<P>
<HR>

<!-- ======== CONSTRUCTOR SUMMARY ======== -->

<A NAME="constructor_summary"><!-- --></A>
<TABLE BORDER="1" WIDTH="100%" CELLPADDING="3" CELLSPACING="0" SUMMARY="">
<TR BGCOLOR="#CCCCFF" CLASS="TableHeadingColor">
<TH ALIGN="left" COLSPAN="2"><FONT SIZE="+2">
<B>Constructor Summary</B></FONT></TH>
</TR>
<TR BGCOLOR="white" CLASS="TableRowColor">
<TD><CODE><B><A HREF="../p/B.html#B()">B</A></B>()</CODE>

<BR>
&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;Creates a B.</TD>
</TR>
</TABLE>
&nbsp;

<!-- ========= CONSTRUCTOR DETAIL ======== -->

<A NAME="constructor_detail"><!-- --></A>
<TABLE BORDER="1" WIDTH="100%" CELLPADDING="3" CELLSPACING="0" SUMMARY="">
<TR BGCOLOR="#CCCCFF" CLASS="TableHeadingColor">
<TH ALIGN="left" COLSPAN="1"><FONT SIZE="+2">
<B>Constructor Detail</B></FONT></TH>
</TR>
</TABLE>

<A NAME="B()"><!-- --></A><H3>
B</H3>
<PRE>
public <B>B</B>()</PRE>
<DL>
<DD>Creates a B.
</DL>
<!-- ========= END OF CLASS DATA ========= -->
<HR>"##,
    )
}

/// The two-type scenario in the generator 1.5 layout, without members on `B` beyond its
/// constructor and without a constants page.
pub fn legacy_tree() -> Tree {
    let tree = Tree::new();
    tree.write("allclasses-frame.html", &legacy_index())
        .write("p/A.html", &legacy_a_page())
        .write("p/B.html", &legacy_b_page());
    tree
}
