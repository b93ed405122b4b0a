//! Whole-file emission compared against golden headers.

mod common;

use common::{const_ref, doc, fixture, pp, ptr, raw_body, var};
use cppkit_ast::{
    AccessType, Attribs, BaseClass, Compound, Constructor, Destructor, Entity, Enum, EnumItem,
    Expr, ForwardClassDecl, Function, MemberInit, Param, Preprocessor, Var, VarType,
};
use cppkit_writer::{EmitMode, Writer};
use eyre::Result;

fn const_member(ty: &str, name: &str) -> Var {
    Var::new(VarType::new(ty).const_(), name)
}

fn empty_ctor_body() -> Compound {
    raw_body("\n")
}

fn int_flags() -> Var {
    var(VarType::new("int"), "flags").assign(Expr::number(0))
}

fn pure_virtual() -> Attribs {
    Attribs::VIRTUAL | Attribs::PURE_VIRTUAL
}

fn splitter_params() -> Compound {
    Compound::struct_("wxSplitterRenderParams")
        .apidecor("WXDLLIMPEXP_CORE")
        .member(doc(
            "    // the only way to initialize this struct is by using this ctor",
        ))
        .member(
            Constructor::new("wxSplitterRenderParams")
                .param(var(VarType::new("wxCoord"), "widthSash_"))
                .param(var(VarType::new("wxCoord"), "border_"))
                .param(var(VarType::new("bool"), "isSens_"))
                .member_init(MemberInit::new("widthSash", [Expr::name("widthSash_")]))
                .member_init(MemberInit::new("border", [Expr::name("border_")]))
                .member_init(MemberInit::new("isHotSensitive", [Expr::name("isSens_")]))
                .body(empty_ctor_body()),
        )
        .member(doc("    // the width of the splitter sash"))
        .member(const_member("wxCoord", "widthSash"))
        .member(doc("    // the width of the border of the splitter window"))
        .member(const_member("wxCoord", "border"))
        .member(doc(
            "    // true if the splitter changes its appearance when the mouse is over it",
        ))
        .member(const_member("bool", "isHotSensitive"))
}

fn renderer_version() -> Compound {
    Compound::struct_("wxRendererVersion")
        .apidecor("WXDLLIMPEXP_CORE")
        .member(
            Constructor::new("wxRendererVersion")
                .param(var(VarType::new("int"), "version_"))
                .param(var(VarType::new("int"), "age_"))
                .member_init(MemberInit::new("version", [Expr::name("version_")]))
                .member_init(MemberInit::new("age", [Expr::name("age_")]))
                .body(empty_ctor_body()),
        )
        .member(
            Enum::new("")
                .item(EnumItem::valued("Current_Version", Expr::number(1)))
                .item(EnumItem::valued("Current_Age", Expr::number(5))),
        )
        .member(doc(
            "    // check if the given version is compatible with the current one",
        ))
        .member(
            Function::new(VarType::new("bool"), "IsCompatible")
                .param(var(const_ref("wxRendererVersion"), "ver"))
                .with_attribs(Attribs::STATIC)
                .body(raw_body(
                    "        return ver.version == Current_Version && ver.age >= Current_Age;\n",
                )),
        )
        .member(const_member("int", "version"))
        .member(const_member("int", "age"))
}

fn dc_params() -> [Param; 3] {
    [
        var(ptr("wxWindow"), "win").into(),
        var(VarType::new("wxDC").reference(), "dc").into(),
        var(const_ref("wxRect"), "rect").into(),
    ]
}

fn renderer_native() -> Compound {
    Compound::class("wxRendererNative")
        .apidecor("WXDLLIMPEXP_CORE")
        .member(Entity::AccessSpecifier(AccessType::Public))
        .member(doc(
            "    // Returns the margin on left and right sides of header button's label",
        ))
        .member(
            Function::new(VarType::new("int"), "GetHeaderButtonMargin")
                .param(var(ptr("wxWindow"), "win"))
                .with_attribs(pure_virtual()),
        )
        .member(doc(
            "    // draw the expanded/collapsed icon for a tree control item",
        ))
        .member(
            Function::new(VarType::new("void"), "DrawTreeItemButton")
                .with_params(dc_params())
                .param(int_flags())
                .with_attribs(pure_virtual()),
        )
        .member(pp(Preprocessor::ifdef("wxHAS_DRAW_TITLE_BAR_BITMAP")))
        .member(
            Function::new(VarType::new("void"), "DrawTitleBarBitmap")
                .with_params(dc_params())
                .param(var(VarType::new("wxTitleBarButton"), "button"))
                .param(int_flags())
                .with_attribs(pure_virtual()),
        )
        .member(pp(Preprocessor::EndIf))
        .member(
            Function::new(VarType::new("wxRendererNative").reference(), "GetDefault")
                .with_attribs(Attribs::STATIC),
        )
        .member(
            Function::new(VarType::new("wxRendererVersion"), "GetVersion")
                .with_attribs(pure_virtual() | Attribs::CONST),
        )
        .member(Destructor::new("wxRendererNative").with_attribs(Attribs::VIRTUAL))
}

fn renderer_header() -> Entity {
    Compound::file()
        .member(doc(
            "///////////////////////////////////////////////////////////////////////////////\n\
             // Name:        wx/renderer.h\n\
             // Purpose:     wxRendererNative class declaration\n\
             ///////////////////////////////////////////////////////////////////////////////",
        ))
        .member(pp(Preprocessor::ifndef("_WX_RENDERER_H_")))
        .member(pp(Preprocessor::define("_WX_RENDERER_H_")))
        .member(ForwardClassDecl::class("wxDC").apidecor("WXDLLIMPEXP_FWD_CORE"))
        .member(ForwardClassDecl::class("wxWindow").apidecor("WXDLLIMPEXP_FWD_CORE"))
        .member(pp(Preprocessor::include_local("wx/gdicmn.h")))
        .member(pp(Preprocessor::include_local("wx/colour.h")))
        .member(doc(
            "// some platforms have their own renderers, others use the generic one",
        ))
        .member(pp(Preprocessor::if_(
            " defined(__WXMSW__) || ( defined(__WXMAC__) && wxOSX_USE_COCOA_OR_CARBON ) || defined(__WXGTK__)",
        )))
        .member(pp(Preprocessor::define("wxHAS_NATIVE_RENDERER")))
        .member(pp(Preprocessor::else_()))
        .member(pp(Preprocessor::Undef("wxHAS_NATIVE_RENDERER".into())))
        .member(pp(Preprocessor::EndIf))
        .member(doc("// control state flags used in wxRenderer and wxColourScheme"))
        .member(
            Enum::new("")
                .item(EnumItem::valued("wxCONTROL_NONE", Expr::number("0x00000000")))
                .item(EnumItem::valued("wxCONTROL_DISABLED", Expr::number("0x00000001")))
                .item(EnumItem::valued("wxCONTROL_FLAGS_MASK", Expr::number("0x000000ff")))
                .item(EnumItem::Entity(Box::new(doc(
                    "    // this is a pseudo flag not used directly by wxRenderer but rather by some\n    // controls internally",
                ))))
                .item(EnumItem::valued("wxCONTROL_DIRTY", Expr::number("0x80000000"))),
        )
        .member(doc("// wxSplitterWindow parameters"))
        .member(splitter_params())
        .member(doc("// wxRendererNative interface version"))
        .member(renderer_version())
        .member(renderer_native())
        .member(pp(Preprocessor::ifndef("wxHAS_NATIVE_RENDERER")))
        .member(doc("// default native renderer is the generic one then"))
        .member(
            Function::new(
                VarType::new("wxRendererNative").reference(),
                "wxRendererNative::GetDefault",
            )
            .with_attribs(Attribs::INLINE)
            .body(raw_body("    return GetGeneric();\n")),
        )
        .member(pp(Preprocessor::EndIf))
        .member(pp(Preprocessor::EndIf))
        .into()
}

#[test]
fn test_renderer_header_matches_golden() -> Result<()> {
    let expected = fixture("renderer_excerpt.h")?;
    let actual = Writer::default().emit(&renderer_header())?;
    assert_eq!(actual, expected);
    Ok(())
}

#[test]
fn test_header_mode_keeps_inline_definitions() -> Result<()> {
    let text = Writer::with_mode(EmitMode::Header).emit(&renderer_header())?;
    assert!(text.contains("  static bool IsCompatible(const wxRendererVersion& ver);\n"));
    assert!(text.contains("inline wxRendererNative& wxRendererNative::GetDefault()\n{\n"));
    assert!(text.contains("  wxSplitterRenderParams(wxCoord widthSash_, wxCoord border_, bool isSens_);\n"));
    Ok(())
}

#[test]
fn test_emission_survives_serde_round_trip() -> Result<()> {
    let tree = renderer_header();
    let json = serde_json::to_string(&tree)?;
    let restored: Entity = serde_json::from_str(&json)?;
    assert_eq!(restored, tree);

    let writer = Writer::default();
    assert_eq!(writer.emit(&restored)?, writer.emit(&tree)?);
    Ok(())
}

#[test]
fn test_write_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("renderer.h");
    Writer::default().write_file(&renderer_header(), &path)?;
    assert_eq!(std::fs::read_to_string(&path)?, fixture("renderer_excerpt.h")?);
    Ok(())
}

#[test]
fn test_write_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("renderer.h");
    let err = Writer::default()
        .write_file(&renderer_header(), &path)
        .unwrap_err();
    assert!(matches!(
        *err,
        cppkit_writer::Error::Io { path: ref p, .. } if *p == path
    ));
}

#[test]
fn test_write_to_sink() -> Result<()> {
    let class = Compound::class("GrContext")
        .apidecor("SK_API")
        .base(BaseClass::public("GrRecordingContext"))
        .member(Entity::AccessSpecifier(AccessType::Public))
        .member(
            Function::new(VarType::new("sk_sp<GrContext>"), "MakeGL")
                .with_attribs(Attribs::STATIC),
        )
        .member(Destructor::new("GrContext"));
    let mut sink = Vec::new();
    Writer::default().write_to(&class.into(), &mut sink)?;
    assert_eq!(
        String::from_utf8(sink)?,
        "class SK_API GrContext : public GrRecordingContext\n{\npublic:\n  static sk_sp<GrContext> MakeGL();\n  ~GrContext();\n};\n"
    );
    Ok(())
}
