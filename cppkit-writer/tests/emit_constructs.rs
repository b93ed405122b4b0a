//! Rendering of individual constructs in raw mode.

mod common;

use common::{const_ref, ptr, var};
use cppkit_ast::{
    AccessType, Attribs, BaseClass, BinaryOp, Compound, Constructor, Entity, Enum, EnumItem,
    Expr, ForwardClassDecl, Function, FunctionPointer, IfBlock, LambdaExpr, MacroCall,
    NamespaceAlias, RangeForBlock, TemplateParam, TemplateParams, TypeModifier, TypedefList,
    TypedefName, UnaryOp, UsingDecl, UsingNamespace, UsingTarget, Var, VarDecl, VarList, VarType,
};
use cppkit_writer::Writer;

fn emit(entity: impl Into<Entity>) -> String {
    Writer::default().emit(&entity.into()).unwrap()
}

#[test]
fn test_template_class() {
    let params = TemplateParams::new([
        TemplateParam::typename("T"),
        TemplateParam::typename("Alloc").default(Expr::name("std::allocator<T>")),
    ]);
    let storage = VarType::defined_by(
        Compound::union("")
            .member(var(ptr("T"), "data_"))
            .member(var(ptr("char"), "raw_"))
            .into(),
    );
    let index = Function::new(VarType::new("T").reference(), "operator[]")
        .param(var(VarType::new("size_t"), "i"))
        .body(Compound::block_of([Entity::Return(Some(Expr::binary(
            Expr::name("data_"),
            BinaryOp::Subscript,
            Expr::name("i"),
        )))]));
    let class = Compound::class("Vector")
        .template(params)
        .base(BaseClass::public("Base<T>"))
        .member(Entity::AccessSpecifier(AccessType::Public))
        .member(UsingDecl::alias("value_type", UsingTarget::Type(VarType::new("T"))))
        .member(
            Constructor::new("Vector")
                .param(var(VarType::new("size_t"), "n"))
                .with_attribs(Attribs::EXPLICIT),
        )
        .member(index)
        .member(Entity::AccessSpecifier(AccessType::Private))
        .member(Var::new(storage, "storage_"))
        .member(var(VarType::new("size_t"), "size_").assign(Expr::number(0)));

    insta::assert_snapshot!(emit(class), @r"
template <typename T, typename Alloc = std::allocator<T>>
class Vector : public Base<T>
{
public:
  using value_type = T;
  explicit Vector(size_t n);
  T& operator[](size_t i)
  {
    return data_[i];
  }
private:
  union
  {
    T* data_;
    char* raw_;
  } storage_;
  size_t size_ = 0;
};
");
}

#[test]
fn test_function_body_statements() {
    let positive = LambdaExpr::new(Compound::block_of([Entity::Return(Some(Expr::binary(
        Expr::name("v"),
        BinaryOp::Gt,
        Expr::number(0),
    )))]))
    .param(var(VarType::new("int"), "v"))
    .returns(VarType::new("bool"));
    let count = RangeForBlock::new(
        Var::new(const_ref("auto"), "item"),
        Expr::name("items"),
        Compound::block_of([Entity::from(IfBlock::new(
            Expr::call(Expr::name("positive"), [Expr::name("item")]),
            Entity::Expr(Expr::unary(UnaryOp::PreIncrement, Expr::name("n"))),
        ))]),
    );
    let func = Function::new(VarType::new("int"), "count_positive")
        .param(var(const_ref("std::vector<int>"), "items"))
        .body(Compound::block_of([
            Entity::from(Var::new(VarType::new("auto"), "positive").assign(Expr::lambda(positive))),
            Entity::from(var(VarType::new("int"), "n").assign(Expr::number(0))),
            Entity::from(count),
            Entity::Return(Some(Expr::name("n"))),
        ]));

    insta::assert_snapshot!(emit(func), @r"
int count_positive(const std::vector<int>& items)
{
  auto positive = [](int v) -> bool {
    return v > 0;
  };
  int n = 0;
  for (const auto& item : items)
  {
    if (positive(item))
      ++n;
  }
  return n;
}
");
}

#[test]
fn test_aliases_in_namespace() {
    let callback = FunctionPointer::new(VarType::new("void"), "")
        .param(Var::unnamed(VarType::new("int")))
        .param(Var::unnamed(ptr("void")));
    let points = TypedefList {
        var_list: VarList::new(Var::new(VarType::new("struct tagPOINT"), "POINT"))
            .item(TypeModifier::pointer(1), VarDecl::new("LPPOINT")),
    };
    let ns = Compound::namespace("wx")
        .member(TypedefName::new(VarType::new("unsigned int"), "wxUint32"))
        .member(points)
        .member(UsingDecl::alias(
            "Callback",
            UsingTarget::FunctionPointer(Box::new(callback)),
        ))
        .member(NamespaceAlias::new("fs", "std::filesystem"))
        .member(UsingNamespace::new("std"))
        .member(UsingDecl::new("Base::draw"));

    insta::assert_snapshot!(emit(ns), @r"
namespace wx
{
typedef unsigned int wxUint32;
typedef struct tagPOINT POINT, *LPPOINT;
using Callback = void (*)(int, void*);
namespace fs = std::filesystem;
using namespace std;
using Base::draw;
}
");
}

#[test]
fn test_enums() {
    let status = Enum::new("Status")
        .scoped()
        .underlying("uint8_t")
        .item(EnumItem::constant("Ok"))
        .item(EnumItem::valued("Failed", Expr::number(2)));
    let file = Compound::file()
        .member(status)
        .member(Enum::opaque("Mode").scoped().underlying("int"));

    insta::assert_snapshot!(emit(file), @r"
enum class Status : uint8_t
{
  Ok,
  Failed = 2
};
enum class Mode : int;
");
}

#[test]
fn test_attribute_specifiers() {
    let parse = Function::new(VarType::new("int"), "parse")
        .param(var(ptr("char").with_attribs(Attribs::CONST), "text"))
        .with_attribs(Attribs::STATIC)
        .attribute(Expr::name("nodiscard"))
        .attribute(Expr::call(
            Expr::name("deprecated"),
            [Expr::string_literal("use parse_v2")],
        ));
    let unused = var(VarType::new("int"), "scratch").attribute(Expr::name("maybe_unused"));
    let class = Compound::struct_("Parser")
        .attribute(Expr::name("nodiscard"))
        .member(parse)
        .member(unused);

    insta::assert_snapshot!(emit(class), @r#"
struct [[nodiscard]] Parser
{
  [[nodiscard, deprecated("use parse_v2")]] static int parse(const char* text);
  [[maybe_unused]] int scratch;
};
"#);
}

#[test]
fn test_class_level_declarations() {
    let class = Compound::class("wxComboBox")
        .member(ForwardClassDecl::class("wxComboBoxPopup").friend())
        .member(MacroCall::new("wxDECLARE_DYNAMIC_CLASS(wxComboBox);"))
        .member(Entity::AccessSpecifier(AccessType::Protected))
        .member(
            Function::new(VarType::new("void"), "DoClear")
                .with_attribs(Attribs::VIRTUAL | Attribs::OVERRIDE),
        )
        .member(
            FunctionPointer::new(VarType::new("int"), "Handler")
                .owner("wxComboBox")
                .param(Var::unnamed(VarType::new("int")))
                .typedef(),
        );

    insta::assert_snapshot!(emit(class), @r"
class wxComboBox
{
  friend class wxComboBoxPopup;
  wxDECLARE_DYNAMIC_CLASS(wxComboBox);
protected:
  virtual void DoClear() override;
  typedef int (wxComboBox::*Handler)(int);
};
");
}
