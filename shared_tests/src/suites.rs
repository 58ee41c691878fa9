//! Suites of tests applied across multiple crates and registries

use pretty_assertions::assert_eq;

use zencoding_core::{extract_abbreviation, text::{escape_text, unescape_text}};
use super::Expander;


/// Expansion with the `plain` profile: the operators, attributes, counters,
/// groups, and the resources of the built-in syntaxes.
pub fn test_suite_expand<E: Expander>(e: &E) {
    macro_rules! test {
        ($abbr:expr => $expected:expr)
            =>
        {test!($abbr, "html" => $expected)};

        ($abbr:expr, $syntax:expr => $expected:expr)
            =>
        {assert_eq!(e.expand($abbr, $syntax, "plain"), $expected, "{:?}", $abbr)};
    }

    // Operators
    test!("p+p" => "<p></p><p></p>");
    test!("p+P" => "<p></p><P></P>");
    test!("p.name+p+p" => r#"<p class="name"></p><p></p><p></p>"#);
    test!("p>em" => "<p><em></em></p>");
    test!("p.hello>em.world>span"
          => r#"<p class="hello"><em class="world"><span></span></em></p>"#);

    // Attributes
    test!("p.name" => r#"<p class="name"></p>"#);
    test!("p.one.two.three" => r#"<p class="one two three"></p>"#);
    test!("p.one-two.three" => r#"<p class="one-two three"></p>"#);
    test!("p.one.two-three" => r#"<p class="one two-three"></p>"#);
    test!("p.one_two-three" => r#"<p class="one_two-three"></p>"#);
    test!("p#myid" => r#"<p id="myid"></p>"#);
    test!("p#myid.name_with-dash32.otherclass"
          => r#"<p id="myid" class="name_with-dash32 otherclass"></p>"#);
    test!("span.one.two.three" => r#"<span class="one two three"></span>"#);
    test!("span.one#two" => r#"<span class="one" id="two"></span>"#);
    test!("span.one.two#three" => r#"<span class="one two" id="three"></span>"#);
    test!("span[title]" => r#"<span title=""></span>"#);
    test!("span[title data]" => r#"<span title="" data=""></span>"#);
    test!("span.test[title data]" => r#"<span class="test" title="" data=""></span>"#);
    test!("span#one.two[title data]"
          => r#"<span id="one" class="two" title="" data=""></span>"#);
    test!("span[title=Hello]" => r#"<span title="Hello"></span>"#);
    test!(r#"span[title="Hello world"]"# => r#"<span title="Hello world"></span>"#);
    test!("span[title='Hello world']" => r#"<span title="Hello world"></span>"#);
    test!(r#"span[title="Hello world" data=other]"#
          => r#"<span title="Hello world" data="other"></span>"#);
    test!(r#"span[title="Hello world" data=other attr2 attr3]"#
          => r#"<span title="Hello world" data="other" attr2="" attr3=""></span>"#);
    test!(r#"span[title="Hello world" data=other attr2 attr3]>em"#
          => r#"<span title="Hello world" data="other" attr2="" attr3=""><em></em></span>"#);
    test!("filelist[id=javascript.files]" => r#"<filelist id="javascript.files"></filelist>"#);

    // Expandos
    test!("dl+" => "<dl><dt></dt><dd></dd></dl>");
    test!("table+" => "<table><tr><td></td></tr></table>");
    test!("div+div>dl+" => "<div></div><div><dl><dt></dt><dd></dd></dl></div>");

    // Counters
    test!("ul#nav>li.item$*3"
          => concat!(r#"<ul id="nav"><li class="item1"></li><li class="item2"></li>"#,
                     r#"<li class="item3"></li></ul>"#));
    test!("ul#nav>li.item$$$*3"
          => concat!(r#"<ul id="nav"><li class="item001"></li><li class="item002"></li>"#,
                     r#"<li class="item003"></li></ul>"#));
    test!("ul#nav>li.$$item$$$*3"
          => concat!(r#"<ul id="nav"><li class="01item001"></li><li class="02item002"></li>"#,
                     r#"<li class="03item003"></li></ul>"#));
    test!("ul#nav>li.pre$*3+li.post$*3"
          => concat!(r#"<ul id="nav"><li class="pre1"></li><li class="pre2"></li>"#,
                     r#"<li class="pre3"></li><li class="post1"></li><li class="post2"></li>"#,
                     r#"<li class="post3"></li></ul>"#));
    test!(".sample$*3"
          => concat!(r#"<div class="sample1"></div><div class="sample2"></div>"#,
                     r#"<div class="sample3"></div>"#));
    test!("ul#nav>li{text}*3" => r#"<ul id="nav"><li>text</li><li>text</li><li>text</li></ul>"#);
    test!("li#id$.class$*3"
          => concat!(r#"<li id="id1" class="class1"></li><li id="id2" class="class2"></li>"#,
                     r#"<li id="id3" class="class3"></li>"#));

    // Resources
    test!("bq>p" => "<blockquote><p></p></blockquote>");
    test!("script" => r#"<script type="text/javascript"></script>"#);
    test!("script:src" => r#"<script type="text/javascript" src=""></script>"#);
    test!("img" => r#"<img src="" alt="" />"#);
    test!("input:c" => r#"<input type="checkbox" name="" id="" />"#);
    test!("some:elem" => "<some:elem></some:elem>");
    test!("select#test" => r#"<select name="" id="test"></select>"#);
    test!("dol" => "$db->connect()\n\t$$$more dollaz1");

    // XSL
    test!("tmatch", "xsl" => r#"<xsl:template match="" mode=""></xsl:template>"#);
    test!("choose+", "xsl"
          => concat!(r#"<xsl:choose><xsl:when test=""></xsl:when>"#,
                     "<xsl:otherwise></xsl:otherwise></xsl:choose>"));
    test!("xsl:variable>div+p", "xsl" => "<xsl:variable><div></div><p></p></xsl:variable>");
    test!("var>div+p", "xsl" => r#"<xsl:variable name=""><div></div><p></p></xsl:variable>"#);
    test!("ap", "xsl" => r#"<xsl:apply-templates select="" mode="" />"#);
    test!("ap>wp*2", "xsl"
          => concat!(r#"<xsl:apply-templates select="" mode="">"#,
                     r#"<xsl:with-param name="" select="" />"#,
                     r#"<xsl:with-param name="" select="" />"#,
                     "</xsl:apply-templates>"));
    test!("vare>p", "xsl" => r#"<xsl:variable name=""><p></p></xsl:variable>"#);

    // CSS
    test!("@i", "css" => "@import url(|);");
    test!("!", "css" => "!important");
    test!("pos:s", "css" => "position:static;");
    test!("ti:-", "css" => "text-indent:-9999px;");
    test!("bdb+", "css" => "border-bottom:1px solid #000;");

    // Inheritance, and syntaxes without resources
    test!("a", "xsl" => r#"<a href=""></a>"#);
    test!("a", "foo" => "<a></a>");
    test!("bq>p", "foo" => "<bq><p></p></bq>");

    // Groups
    test!("div#head+(p>p)+div#footer"
          => r#"<div id="head"></div><p><p></p></p><div id="footer"></div>"#);
    test!("div#head>((ul#nav>li*3)+(div.subnav>p)+(div.othernav))+div#footer"
          => concat!(r#"<div id="head"><ul id="nav"><li></li><li></li><li></li></ul>"#,
                     r#"<div class="subnav"><p></p></div><div class="othernav"></div>"#,
                     r#"<div id="footer"></div></div>"#));
    test!("div#head>(ul#nav>li*3>(div.subnav>p)+(div.othernav))+div#footer"
          => concat!(r#"<div id="head"><ul id="nav">"#,
                     r#"<li><div class="subnav"><p></p></div><div class="othernav"></div></li>"#,
                     r#"<li><div class="subnav"><p></p></div><div class="othernav"></div></li>"#,
                     r#"<li><div class="subnav"><p></p></div><div class="othernav"></div></li>"#,
                     r#"</ul><div id="footer"></div></div>"#));
    test!("ul>li.pre$*2+(li.item$*4>a)+li.post$*2"
          => concat!(r#"<ul><li class="pre1"></li><li class="pre2"></li>"#,
                     r#"<li class="item1"><a href=""></a></li>"#,
                     r#"<li class="item2"><a href=""></a></li>"#,
                     r#"<li class="item3"><a href=""></a></li>"#,
                     r#"<li class="item4"><a href=""></a></li>"#,
                     r#"<li class="post1"></li><li class="post2"></li></ul>"#));
    test!("div>(i+b)*2+(span+em)*3"
          => concat!("<div><i></i><b></b><i></i><b></b>",
                     "<span></span><em></em><span></span><em></em><span></span><em></em></div>"));

    // Short notation
    test!("#content" => r#"<div id="content"></div>"#);
    test!(".content" => r#"<div class="content"></div>"#);
    test!("#content.demo" => r#"<div id="content" class="demo"></div>"#);
    test!(".demo[title=test]" => r#"<div class="demo" title="test"></div>"#);
    test!("#some_id>.some_class" => r#"<div id="some_id"><div class="some_class"></div></div>"#);

    // Text nodes
    test!("span>{Hello world}" => "<span>Hello world</span>");
    test!("span{Hello world}" => "<span>Hello world</span>");
    test!("span>{Hello}+{ world}" => "<span>Hello world</span>");
    test!("span>{Click }+(a[href=/url/]{here})+{ for more info}"
          => r#"<span>Click <a href="/url/">here</a> for more info</span>"#);

    // Variables
    test!("p{${charset}}" => "<p>UTF-8</p>");
    test!("p{${nope}}" => "<p>${nope}</p>");

    // Invalid input gives nothing
    test!("" => "");
    test!("div[title" => "");
    test!("div{text" => "");
    test!("(div" => "");
    test!("div)" => "");
    test!("()" => "");
}

/// Line breaks and indentation of the `xhtml`, `html`, and `xml` profiles,
/// and the HAML syntax.
pub fn test_suite_formatting<E: Expander>(e: &E) {
    macro_rules! test {
        ($abbr:expr, $syntax:expr, $profile:expr => $expected:expr)
            =>
        {assert_eq!(e.expand($abbr, $syntax, $profile), $expected, "{:?}", $abbr)};
    }

    test!("bq>p", "html", "xhtml" => "<blockquote>\n\t<p>|</p>\n</blockquote>");
    test!("bq+p", "html", "xhtml" => "<blockquote>|</blockquote>\n<p>|</p>");
    test!("img+p", "html", "xhtml" => "<img src=\"|\" alt=\"|\" />\n<p>|</p>");
    test!("img", "html", "html" => "<img src=\"|\" alt=\"|\">");
    test!("vare", "xsl", "xml" => "<xsl:variable name=\"|\" select=\"|\"/>");
    test!("vare+p", "xsl", "xml" => "<xsl:variable name=\"|\" select=\"|\"/>\n<p>\n\t|\n</p>");

    test!("div>span*2", "html", "xhtml" => "<div><span>|</span><span>|</span></div>");
    test!("div>span*3", "html", "xhtml"
          => "<div>\n\t<span>|</span>\n\t<span>|</span>\n\t<span>|</span>\n</div>");
    test!("span*2", "html", "xhtml" => "<span>|</span><span>|</span>");
    test!("span*3", "html", "xhtml" => "<span>|</span>\n<span>|</span>\n<span>|</span>");
    test!("span{hello world}+span{hello |world}", "html", "xhtml"
          => "<span>|hello world</span><span>hello |world</span>");

    // HAML
    test!("div+p", "haml", "xhtml" => "%div|\n%p|");
    test!("div", "haml", "xhtml" => "%div|");
    test!("#content", "haml", "xhtml" => "#content|");
    test!("p.a.b[title=x]", "haml", "xhtml" => "%p.a.b{:title => \"x\"}|");
}

/// Filters selected by the `|f1|f2` suffix.
pub fn test_suite_filters<E: Expander>(e: &E) {
    macro_rules! test {
        ($abbr:expr, $syntax:expr, $profile:expr => $expected:expr)
            =>
        {assert_eq!(e.expand($abbr, $syntax, $profile), $expected, "{:?}", $abbr)};
    }

    test!("#content|e", "html", "plain" => r#"&lt;div id="content"&gt;&lt;/div&gt;"#);
    test!("#content|e|e", "html", "plain"
          => r#"&amp;lt;div id="content"&amp;gt;&amp;lt;/div&amp;gt;"#);
    test!("fl:r|fc", "css", "plain" => "float: right;");
    test!("fl:r+d:n|fc", "css", "plain" => "float: right;\ndisplay: none;");
    test!("#page>p|c", "html", "xhtml"
          => "<!-- #page -->\n<div id=\"page\">\n\t<p>|</p>\n</div>\n<!-- /#page -->");
    test!("div>p|s", "html", "xhtml" => "<div><p>|</p></div>");
    test!("p|nonexistent", "html", "plain" => "<p></p>");

    // Long names
    test!("#content|escape", "html", "plain" => r#"&lt;div id="content"&gt;&lt;/div&gt;"#);
    test!("fl:r|format-css", "css", "plain" => "float: right;");
    test!("#page>p|comment", "html", "xhtml"
          => "<!-- #page -->\n<div id=\"page\">\n\t<p>|</p>\n</div>\n<!-- /#page -->");
    test!("div>p|single-line", "html", "xhtml" => "<div><p>|</p></div>");
}

/// The same call gives the same output every time, both before and after the
/// lookups it makes have been memoized.
pub fn test_suite_repeat<E: Expander>(e: &E) {
    for (abbr, syntax, profile) in [("ul#nav>li.item$*3>a", "html", "xhtml"),
                                    ("div+div>dl+", "html", "plain"),
                                    ("#page>p|c", "html", "xhtml"),
                                    ("fl:r+d:n|fc", "css", "plain"),
                                    ("choose+", "xsl", "xml"),
                                    ("#content", "haml", "xhtml")]
    {
        let first = e.expand(abbr, syntax, profile);
        assert!(!first.is_empty(), "{:?}", abbr);
        for _ in 0 .. 3 {
            assert_eq!(e.expand(abbr, syntax, profile), first, "{:?}", abbr);
        }
    }
    let first = e.wrap("li*>a", "one\ntwo", "html", "plain");
    assert!(first.is_some());
    for _ in 0 .. 3 {
        assert_eq!(e.wrap("li*>a", "one\ntwo", "html", "plain"), first);
    }
    assert_eq!(e.expand("", "html", "xhtml"), "");
    assert_eq!(e.expand("", "css", "plain"), "");
}

/// Wrapping text with an abbreviation.
pub fn test_suite_wrap<E: Expander>(e: &E) {
    macro_rules! test {
        ($abbr:expr, $text:expr => $expected:expr)
            =>
        {assert_eq!(e.wrap($abbr, $text, "html", "plain").as_deref(), $expected,
                    "{:?}", $abbr)};
    }

    test!("p.test", "hello world" => Some(r#"<p class="test">hello world</p>"#));
    test!("p+p.test", "hello world" => Some(r#"<p></p><p class="test">hello world</p>"#));
    test!("ul#nav.simple>li", "hello world"
          => Some(r#"<ul id="nav" class="simple"><li>hello world</li></ul>"#));
    test!("ul#nav.simple>li*2", "hello world"
          => Some(r#"<ul id="nav" class="simple"><li>hello world</li><li>hello world</li></ul>"#));
    test!("li*", "one\ntwo\nthree" => Some("<li>one</li><li>two</li><li>three</li>"));
    test!("li*>a", "one\ntwo\nthree"
          => Some(concat!(r#"<li><a href="">one</a></li><li><a href="">two</a></li>"#,
                          r#"<li><a href="">three</a></li>"#)));
    test!("li*>a", "раз\nдва\nтри"
          => Some(concat!(r#"<li><a href="">раз</a></li><li><a href="">два</a></li>"#,
                          r#"<li><a href="">три</a></li>"#)));
    test!("cc:ie", "hello world" => Some("<!--[if IE]>\n\thello world|\n<![endif]-->"));
    test!("ul>li*|t", "1. one\n2. two" => Some("<ul><li>one</li><li>two</li></ul>"));
    test!("ul>li*|trim", "1. one\n2. two" => Some("<ul><li>one</li><li>two</li></ul>"));
    test!("p", "a | b \\ c" => Some("<p>a | b \\ c</p>"));
    test!("p[", "text" => None);
}

/// The text utilities, which need no registry.
pub fn test_suite_text() {
    assert_eq!(escape_text(r#"<xsl:apply-templates select="$item | other"/>"#),
               r#"<xsl:apply-templates select="\$item \| other"/>"#);
    assert_eq!(escape_text(r#"<xsl:apply-templates select="item \\| other"/>"#),
               r#"<xsl:apply-templates select="item \\\\\| other"/>"#);
    assert_eq!(unescape_text(r#"<xsl:apply-templates select="\$item \| other"/>"#),
               r#"<xsl:apply-templates select="$item | other"/>"#);
    assert_eq!(unescape_text(r#"<xsl:apply-templates select="item \\\\\| other"/>"#),
               r#"<xsl:apply-templates select="item \\| other"/>"#);

    let abbr = "ul#nav>li.$$item$$$*3>a+span";
    let abbr2 = r#"table>tr>td[colspan=2 title="Hello world"]>span"#;
    assert_eq!(extract_abbreviation(abbr), abbr);
    assert_eq!(extract_abbreviation(&format!("<p>{abbr}")), abbr);
    assert_eq!(extract_abbreviation(&format!("hello {abbr}")), abbr);
    assert_eq!(extract_abbreviation(&format!("<div>{abbr2}")), abbr2);
    assert_eq!(extract_abbreviation(&format!("hello {abbr2}")), abbr2);
    assert_eq!(extract_abbreviation("<div>bq>p"), "bq>p");
    assert_eq!(extract_abbreviation(r#"<div class="hello" id="world">bq>p"#), "bq>p");
    assert_eq!(extract_abbreviation(r#"<div some:extention="value">bq>p"#), "bq>p");
}
