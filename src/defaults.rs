//! The built-in system vocabulary: abbreviations, snippets, element
//! collections, filters, and variables for `html`, `xml`, `xsl`, `haml`, and
//! `css`.
//!
//! Abbreviation values follow the vocabulary's conventions: a value starting
//! with `<` is a tag abbreviation, a key ending with `+` is an expando, and
//! anything else refers to another key.  Snippets mark where children go with
//! `${child}` and where the caret goes with `|`.

use zencoding_core::{ElementType, SyntaxResources, Tier};


const HTML_ABBREVIATIONS: &[(&str, &str)] = &[
    ("a", r#"<a href=""></a>"#),
    ("a:link", r#"<a href="http://|"></a>"#),
    ("a:mail", r#"<a href="mailto:|"></a>"#),
    ("abbr", r#"<abbr title=""></abbr>"#),
    ("acronym", r#"<acronym title=""></acronym>"#),
    ("base", r#"<base href="" />"#),
    ("bdo", r#"<bdo dir=""></bdo>"#),
    ("bdo:r", r#"<bdo dir="rtl"></bdo>"#),
    ("bdo:l", r#"<bdo dir="ltr"></bdo>"#),
    ("link", r#"<link rel="stylesheet" href="" />"#),
    ("link:css", r#"<link rel="stylesheet" type="text/css" href="|style.css" media="all" />"#),
    ("link:print", r#"<link rel="stylesheet" type="text/css" href="|print.css" media="print" />"#),
    ("link:favicon", r#"<link rel="shortcut icon" type="image/x-icon" href="|favicon.ico" />"#),
    ("link:touch", r#"<link rel="apple-touch-icon" href="|favicon.png" />"#),
    ("link:rss",
     r#"<link rel="alternate" type="application/rss+xml" title="RSS" href="|rss.xml" />"#),
    ("link:atom",
     r#"<link rel="alternate" type="application/atom+xml" title="Atom" href="atom.xml" />"#),
    ("meta:utf", r#"<meta http-equiv="Content-Type" content="text/html;charset=UTF-8" />"#),
    ("meta:win",
     r#"<meta http-equiv="Content-Type" content="text/html;charset=windows-1251" />"#),
    ("meta:compat", r#"<meta http-equiv="X-UA-Compatible" content="IE=7" />"#),
    ("style", r#"<style type="text/css"></style>"#),
    ("script", r#"<script type="text/javascript"></script>"#),
    ("script:src", r#"<script type="text/javascript" src=""></script>"#),
    ("img", r#"<img src="" alt="" />"#),
    ("iframe", r#"<iframe src="" frameborder="0"></iframe>"#),
    ("embed", r#"<embed src="" type="" />"#),
    ("object", r#"<object data="" type=""></object>"#),
    ("param", r#"<param name="" value="" />"#),
    ("map", r#"<map name=""></map>"#),
    ("area", r#"<area shape="" coords="" href="" alt="" />"#),
    ("area:d", r#"<area shape="default" href="" alt="" />"#),
    ("area:c", r#"<area shape="circle" coords="" href="" alt="" />"#),
    ("area:r", r#"<area shape="rect" coords="" href="" alt="" />"#),
    ("area:p", r#"<area shape="poly" coords="" href="" alt="" />"#),
    ("form", r#"<form action=""></form>"#),
    ("form:get", r#"<form action="" method="get"></form>"#),
    ("form:post", r#"<form action="" method="post"></form>"#),
    ("label", r#"<label for=""></label>"#),
    ("input", r#"<input type="" />"#),
    ("input:hidden", r#"<input type="hidden" name="" />"#),
    ("input:h", "input:hidden"),
    ("input:text", r#"<input type="text" name="" id="" />"#),
    ("input:t", "input:text"),
    ("input:search", r#"<input type="search" name="" id="" />"#),
    ("input:email", r#"<input type="email" name="" id="" />"#),
    ("input:url", r#"<input type="url" name="" id="" />"#),
    ("input:password", r#"<input type="password" name="" id="" />"#),
    ("input:p", "input:password"),
    ("input:datetime", r#"<input type="datetime" name="" id="" />"#),
    ("input:date", r#"<input type="date" name="" id="" />"#),
    ("input:month", r#"<input type="month" name="" id="" />"#),
    ("input:week", r#"<input type="week" name="" id="" />"#),
    ("input:time", r#"<input type="time" name="" id="" />"#),
    ("input:number", r#"<input type="number" name="" id="" />"#),
    ("input:color", r#"<input type="color" name="" id="" />"#),
    ("input:checkbox", r#"<input type="checkbox" name="" id="" />"#),
    ("input:c", "input:checkbox"),
    ("input:radio", r#"<input type="radio" name="" id="" />"#),
    ("input:r", "input:radio"),
    ("input:range", r#"<input type="range" name="" id="" />"#),
    ("input:file", r#"<input type="file" name="" id="" />"#),
    ("input:f", "input:file"),
    ("input:submit", r#"<input type="submit" value="" />"#),
    ("input:s", "input:submit"),
    ("input:image", r#"<input type="image" src="" alt="" />"#),
    ("input:i", "input:image"),
    ("input:reset", r#"<input type="reset" value="" />"#),
    ("input:button", r#"<input type="button" value="" />"#),
    ("input:b", "input:button"),
    ("select", r#"<select name="" id=""></select>"#),
    ("option", r#"<option value=""></option>"#),
    ("textarea", r#"<textarea name="" id="" cols="30" rows="10"></textarea>"#),
    ("menu:context", r#"<menu type="context"></menu>"#),
    ("menu:c", "menu:context"),
    ("menu:toolbar", r#"<menu type="toolbar"></menu>"#),
    ("menu:t", "menu:toolbar"),
    ("video", r#"<video src=""></video>"#),
    ("audio", r#"<audio src=""></audio>"#),
    ("html:xml", r#"<html xmlns="http://www.w3.org/1999/xhtml"></html>"#),
    ("bq", "<blockquote></blockquote>"),
    ("acr", "<acronym></acronym>"),
    ("fig", "<figure></figure>"),
    ("ifr", "<iframe></iframe>"),
    ("emb", "<embed></embed>"),
    ("obj", "<object></object>"),
    ("src", "<source></source>"),
    ("cap", "<caption></caption>"),
    ("colg", "<colgroup></colgroup>"),
    ("fst", "<fieldset></fieldset>"),
    ("btn", "<button></button>"),
    ("optg", "<optgroup></optgroup>"),
    ("opt", "<option></option>"),
    ("tarea", "<textarea></textarea>"),
    ("leg", "<legend></legend>"),
    ("sect", "<section></section>"),
    ("art", "<article></article>"),
    ("hdr", "<header></header>"),
    ("ftr", "<footer></footer>"),
    ("adr", "<address></address>"),
    ("dlg", "<dialog></dialog>"),
    ("str", "<strong></strong>"),
    ("prog", "<progress></progress>"),
    ("fset", "<fieldset></fieldset>"),
    ("datag", "<datagrid></datagrid>"),
    ("datal", "<datalist></datalist>"),
    ("kg", "<keygen></keygen>"),
    ("out", "<output></output>"),
    ("det", "<details></details>"),
    ("cmd", "<command></command>"),
    // Expandos
    ("ol+", "ol>li"),
    ("ul+", "ul>li"),
    ("dl+", "dl>dt+dd"),
    ("map+", "map>area"),
    ("table+", "table>tr>td"),
    ("colgroup+", "colgroup>col"),
    ("colg+", "colgroup>col"),
    ("tr+", "tr>td"),
    ("select+", "select>option"),
    ("optgroup+", "optgroup>option"),
    ("optg+", "optgroup>option"),
];

const HTML_SNIPPETS: &[(&str, &str)] = &[
    ("cc:ie6", "<!--[if lte IE 6]>\n\t${child}|\n<![endif]-->"),
    ("cc:ie", "<!--[if IE]>\n\t${child}|\n<![endif]-->"),
    ("cc:noie", "<!--[if !IE]><!-->\n\t${child}|\n<!--<![endif]-->"),
    ("html:4t", concat!(
        "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01 Transitional//EN\" ",
        "\"http://www.w3.org/TR/html4/loose.dtd\">\n",
        "<html lang=\"${lang}\">\n",
        "<head>\n",
        "\t<meta http-equiv=\"Content-Type\" content=\"text/html;charset=${charset}\">\n",
        "\t<title></title>\n",
        "</head>\n",
        "<body>\n",
        "\t${child}|\n",
        "</body>\n",
        "</html>")),
    ("html:xt", concat!(
        "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" ",
        "\"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\">\n",
        "<html xmlns=\"http://www.w3.org/1999/xhtml\" xml:lang=\"${lang}\">\n",
        "<head>\n",
        "\t<meta http-equiv=\"Content-Type\" content=\"text/html;charset=${charset}\" />\n",
        "\t<title></title>\n",
        "</head>\n",
        "<body>\n",
        "\t${child}|\n",
        "</body>\n",
        "</html>")),
    ("html:5", concat!(
        "<!DOCTYPE HTML>\n",
        "<html lang=\"${locale}\">\n",
        "<head>\n",
        "\t<meta charset=\"${charset}\">\n",
        "\t<title></title>\n",
        "</head>\n",
        "<body>\n",
        "\t${child}|\n",
        "</body>\n",
        "</html>")),
    ("c", "<!-- |${child} -->"),
];

const EMPTY_ELEMENTS: &str =
    "area,base,basefont,br,col,frame,hr,img,input,isindex,link,meta,param,embed,keygen,command";

const BLOCK_LEVEL_ELEMENTS: &str = concat!(
    "address,applet,blockquote,button,center,dd,del,dir,div,dl,dt,fieldset,form,frameset,",
    "hr,iframe,ins,isindex,li,link,map,menu,noframes,noscript,object,ol,p,pre,script,table,",
    "tbody,td,tfoot,th,thead,tr,ul,h1,h2,h3,h4,h5,h6");

const INLINE_LEVEL_ELEMENTS: &str = concat!(
    "a,abbr,acronym,applet,b,basefont,bdo,big,br,button,cite,code,del,dfn,em,font,i,",
    "iframe,img,input,ins,kbd,label,map,object,q,s,samp,script,select,small,span,strike,",
    "strong,sub,sup,textarea,tt,u,var");

const XSL_ABBREVIATIONS: &[(&str, &str)] = &[
    ("tm", r#"<xsl:template match="" mode="">"#),
    ("tmatch", "tm"),
    ("tn", r#"<xsl:template name="">"#),
    ("tname", "tn"),
    ("xsl:when", r#"<xsl:when test="">"#),
    ("wh", "xsl:when"),
    ("var", r#"<xsl:variable name="">"#),
    ("vare", r#"<xsl:variable name="" select=""/>"#),
    ("if", r#"<xsl:if test="">"#),
    ("call", r#"<xsl:call-template name=""/>"#),
    ("attr", r#"<xsl:attribute name="">"#),
    ("wp", r#"<xsl:with-param name="" select=""/>"#),
    ("par", r#"<xsl:param name="" select=""/>"#),
    ("val", r#"<xsl:value-of select=""/>"#),
    ("co", r#"<xsl:copy-of select=""/>"#),
    ("each", r#"<xsl:for-each select="">"#),
    ("for", "each"),
    ("ap", r#"<xsl:apply-templates select="" mode=""/>"#),
    ("choose+", "xsl:choose>xsl:when+xsl:otherwise"),
    ("xsl:choose+", "xsl:choose>xsl:when+xsl:otherwise"),
];

const CSS_SNIPPETS: &[(&str, &str)] = &[
    ("@i", "@import url(|);"),
    ("@m", "@media print {\n\t|\n}"),
    ("@f", "@font-face {\n\tfont-family:|;\n\tsrc:url(|);\n}"),
    ("!", "!important"),
    ("pos", "position:|;"),
    ("pos:s", "position:static;"),
    ("pos:a", "position:absolute;"),
    ("pos:r", "position:relative;"),
    ("pos:f", "position:fixed;"),
    ("t", "top:|;"),
    ("t:a", "top:auto;"),
    ("r", "right:|;"),
    ("r:a", "right:auto;"),
    ("b", "bottom:|;"),
    ("b:a", "bottom:auto;"),
    ("l", "left:|;"),
    ("l:a", "left:auto;"),
    ("z", "z-index:|;"),
    ("z:a", "z-index:auto;"),
    ("fl", "float:|;"),
    ("fl:n", "float:none;"),
    ("fl:l", "float:left;"),
    ("fl:r", "float:right;"),
    ("cl", "clear:|;"),
    ("cl:n", "clear:none;"),
    ("cl:l", "clear:left;"),
    ("cl:r", "clear:right;"),
    ("cl:b", "clear:both;"),
    ("d", "display:|;"),
    ("d:n", "display:none;"),
    ("d:b", "display:block;"),
    ("d:i", "display:inline;"),
    ("d:ib", "display:inline-block;"),
    ("d:li", "display:list-item;"),
    ("d:t", "display:table;"),
    ("v", "visibility:|;"),
    ("v:v", "visibility:visible;"),
    ("v:h", "visibility:hidden;"),
    ("ov", "overflow:|;"),
    ("ov:v", "overflow:visible;"),
    ("ov:h", "overflow:hidden;"),
    ("ov:s", "overflow:scroll;"),
    ("ov:a", "overflow:auto;"),
    ("m", "margin:|;"),
    ("m:a", "margin:auto;"),
    ("m:0", "margin:0;"),
    ("mt", "margin-top:|;"),
    ("mr", "margin-right:|;"),
    ("mb", "margin-bottom:|;"),
    ("ml", "margin-left:|;"),
    ("p", "padding:|;"),
    ("p:0", "padding:0;"),
    ("pt", "padding-top:|;"),
    ("pr", "padding-right:|;"),
    ("pb", "padding-bottom:|;"),
    ("pl", "padding-left:|;"),
    ("w", "width:|;"),
    ("w:a", "width:auto;"),
    ("h", "height:|;"),
    ("h:a", "height:auto;"),
    ("maw", "max-width:|;"),
    ("mah", "max-height:|;"),
    ("miw", "min-width:|;"),
    ("mih", "min-height:|;"),
    ("o", "outline:|;"),
    ("o:n", "outline:none;"),
    ("bd", "border:|;"),
    ("bd+", "border:1px solid #000;"),
    ("bd:n", "border:none;"),
    ("bdt+", "border-top:1px solid #000;"),
    ("bdr+", "border-right:1px solid #000;"),
    ("bdb+", "border-bottom:1px solid #000;"),
    ("bdl+", "border-left:1px solid #000;"),
    ("bdrs", "border-radius:|;"),
    ("bg", "background:|;"),
    ("bg+", "background:#|fff url() 0 0 no-repeat;"),
    ("bg:n", "background:none;"),
    ("bgc", "background-color:#|fff;"),
    ("bgi", "background-image:url(|);"),
    ("bgr", "background-repeat:|;"),
    ("bgp", "background-position:|;"),
    ("c", "color:#|000;"),
    ("op", "opacity:|;"),
    ("cur", "cursor:|;"),
    ("cur:a", "cursor:auto;"),
    ("cur:d", "cursor:default;"),
    ("cur:p", "cursor:pointer;"),
    ("ta", "text-align:|;"),
    ("ta:l", "text-align:left;"),
    ("ta:c", "text-align:center;"),
    ("ta:r", "text-align:right;"),
    ("td", "text-decoration:|;"),
    ("td:n", "text-decoration:none;"),
    ("td:u", "text-decoration:underline;"),
    ("ti", "text-indent:|;"),
    ("ti:-", "text-indent:-9999px;"),
    ("tt", "text-transform:|;"),
    ("tt:u", "text-transform:uppercase;"),
    ("tt:l", "text-transform:lowercase;"),
    ("lh", "line-height:|;"),
    ("ws", "white-space:|;"),
    ("ws:n", "white-space:normal;"),
    ("ws:nw", "white-space:nowrap;"),
    ("f", "font:|;"),
    ("fw", "font-weight:|;"),
    ("fw:n", "font-weight:normal;"),
    ("fw:b", "font-weight:bold;"),
    ("fs", "font-style:|;"),
    ("fs:n", "font-style:normal;"),
    ("fs:i", "font-style:italic;"),
    ("fz", "font-size:|;"),
    ("ff", "font-family:|;"),
    ("ff:s", "font-family:serif;"),
    ("ff:ss", "font-family:sans-serif;"),
    ("ff:m", "font-family:monospace;"),
    ("lis", "list-style:|;"),
    ("lis:n", "list-style:none;"),
    ("bxz", "box-sizing:|;"),
    ("bxz:bb", "box-sizing:border-box;"),
    ("zoo", "zoom:1;"),
];


fn insert_all(resources: &mut SyntaxResources, insert: fn(&mut SyntaxResources, &str, &str),
              entries: &[(&str, &str)])
{
    for &(key, value) in entries {
        insert(resources, key, value);
    }
}

/// The system tier of the built-in vocabulary.
pub fn system_tier() -> Tier {
    let mut tier = Tier::new();
    let _ = tier.set_variable("lang", "en")
                .set_variable("locale", "en-US")
                .set_variable("charset", "UTF-8")
                .set_variable("indentation", "\t")
                .set_variable("newline", "\n");

    let html = tier.syntax_mut("html");
    insert_all(html, |r, k, v| { let _ = r.insert_abbreviation(k, v); }, HTML_ABBREVIATIONS);
    insert_all(html, |r, k, v| { let _ = r.insert_snippet(k, v); }, HTML_SNIPPETS);
    let _ = html.set_element_types(ElementType::Empty, EMPTY_ELEMENTS)
                .set_element_types(ElementType::BlockLevel, BLOCK_LEVEL_ELEMENTS)
                .set_element_types(ElementType::InlineLevel, INLINE_LEVEL_ELEMENTS)
                .set_filters("html");

    let css = tier.syntax_mut("css");
    insert_all(css, |r, k, v| { let _ = r.insert_snippet(k, v); }, CSS_SNIPPETS);
    let _ = css.set_filters("html,css");

    let xsl = tier.syntax_mut("xsl");
    insert_all(xsl, |r, k, v| { let _ = r.insert_abbreviation(k, v); }, XSL_ABBREVIATIONS);
    let _ = xsl.set_extends("html").set_filters("html, xsl");

    let _ = tier.syntax_mut("xml").set_extends("html").set_filters("html");
    let _ = tier.syntax_mut("haml").set_extends("html").set_filters("haml");

    tier
}


#[cfg(test)]
mod tests {
    use super::*;
    use zencoding_core::{ResourceEntry, Vocabulary};

    #[test]
    fn entries_parse() {
        let voc = Vocabulary::new(system_tier());
        for &(key, _) in HTML_ABBREVIATIONS {
            let entry = voc.get_abbreviation("html", key);
            assert!(entry.is_some(), "{key}");
            if !key.ends_with('+') {
                assert!(matches!(voc.resolve_abbreviation("html", key),
                                 Some(ResourceEntry::TagAbbreviation(_))),
                        "{key}");
            }
        }
        for &(key, _) in XSL_ABBREVIATIONS.iter().filter(|(k, _)| !k.ends_with('+')) {
            assert!(matches!(voc.resolve_abbreviation("xsl", key),
                             Some(ResourceEntry::TagAbbreviation(_))),
                    "{key}");
        }
    }

    #[test]
    fn inheritance() {
        let voc = Vocabulary::new(system_tier());
        assert!(voc.get_abbreviation("xsl", "a").is_some());
        assert!(voc.get_abbreviation("haml", "img").is_some());
        assert_eq!(voc.get_filters("haml"), Some("haml"));
        assert_eq!(voc.get_variable("css", "charset"), Some("UTF-8"));
        assert_eq!(voc.get_snippet("css", "ti:-"), Some("text-indent:-9999px;"));
    }
}
