use super::Parser;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::Decorator;
use crate::ast::import_export::ExportName;
use crate::ast::import_export::ExportNames;
use crate::ast::import_export::ImportName;
use crate::ast::import_export::ImportNames;
use crate::ast::node::Node;
use crate::ast::stmt::decl::PatDecl;
use crate::ast::stmt::ExportDefaultExprStmt;
use crate::ast::stmt::ExportListStmt;
use crate::ast::stmt::ImportStmt;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::decode_string_literal;
use crate::lex::KEYWORDS_MAPPING;
use crate::token::TT;

impl<'a> Parser<'a> {
  fn module_specifier(&mut self) -> SyntaxResult<String> {
    let t = self.require(TT::LiteralString)?;
    decode_string_literal(self.str(t.loc), t.loc)
  }

  // Names in import and export lists may be any identifier name, including keywords, or a string.
  fn module_export_name(&mut self) -> SyntaxResult<String> {
    let t = self.peek();
    match t.typ {
      TT::LiteralString => {
        self.consume();
        decode_string_literal(self.str(t.loc), t.loc)
      }
      TT::Identifier => Ok(self.consume_as_string()),
      typ if KEYWORDS_MAPPING.contains_key(&typ) => Ok(self.consume_as_string()),
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("exported name"))),
    }
  }

  fn consume_if_contextual(&mut self, name: &str) -> bool {
    let matched = self.is_contextual(self.peek(), name);
    if matched {
      self.consume();
    };
    matched
  }

  pub fn import_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    self
      .with_loc(|p| {
        p.require(TT::KeywordImport)?;
        if p.peek().typ == TT::LiteralString {
          let module = p.module_specifier()?;
          p.require_semicolon_or_asi()?;
          return Ok(ImportStmt {
            default: None,
            names: None,
            module,
          });
        };
        let default = if p.peek().typ == TT::Identifier {
          Some(p.id_pat_decl()?)
        } else {
          None
        };
        let names = if default.is_none() || p.consume_if(TT::Comma).is_match() {
          let t = p.peek();
          Some(match t.typ {
            TT::Asterisk => {
              p.consume();
              p.require_contextual("as")?;
              ImportNames::All(p.id_pat_decl()?)
            }
            TT::BraceOpen => {
              p.consume();
              ImportNames::Specific(p.list_until_tt(TT::BraceClose, |p| p.import_name())?)
            }
            _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("import names"))),
          })
        } else {
          None
        };
        p.require_contextual("from")?;
        let module = p.module_specifier()?;
        p.require_semicolon_or_asi()?;
        Ok(ImportStmt {
          default,
          names,
          module,
        })
      })
      .map(|node| node.into_wrapped())
  }

  fn import_name(&mut self) -> SyntaxResult<Node<ImportName>> {
    self.with_loc(|p| {
      let t = p.peek();
      let importable = p.module_export_name()?;
      let alias = if p.consume_if_contextual("as") {
        p.id_pat_decl()?
      } else if t.typ == TT::Identifier {
        Node::new(t.loc, PatDecl {
          pat: Node::new(t.loc, IdPat {
            name: importable.clone(),
          })
          .into_wrapped(),
        })
      } else {
        return Err(p.peek().error(SyntaxErrorType::ExpectedSyntax("`as`")));
      };
      Ok(ImportName { importable, alias })
    })
  }

  fn export_name(&mut self) -> SyntaxResult<Node<ExportName>> {
    self.with_loc(|p| {
      let t = p.peek();
      let exportable = p.module_export_name()?;
      let alias = if p.consume_if_contextual("as") {
        let a = p.peek();
        let name = p.module_export_name()?;
        Node::new(a.loc, IdPat { name })
      } else {
        Node::new(t.loc, IdPat {
          name: exportable.clone(),
        })
      };
      Ok(ExportName { exportable, alias })
    })
  }

  /// Any `export` statement. `decorators` holds decorators that appeared before the `export` keyword.
  pub fn export_stmt(&mut self, mut decorators: Vec<Node<Decorator>>) -> SyntaxResult<Node<Stmt>> {
    let start = match decorators.first() {
      Some(d) => d.loc,
      None => self.peek().loc,
    };
    self.require(TT::KeywordExport)?;
    let (t0, t1) = self.peek_2();
    let is_async_func = self.is_contextual(t0, "async")
      && t1.typ == TT::KeywordFunction
      && !t1.preceded_by_line_terminator;
    let mut stmt: Node<Stmt> = match t0.typ {
      TT::KeywordDefault => {
        self.consume();
        decorators.extend(self.decorators()?);
        let (t0, t1) = self.peek_2();
        if t0.typ == TT::KeywordClass {
          self.class_decl(decorators, true, true)?.into_wrapped()
        } else if let Some(d) = decorators.first() {
          return Err(d.error(SyntaxErrorType::ExpectedSyntax("class after decorators")));
        } else if t0.typ == TT::KeywordFunction
          || (self.is_contextual(t0, "async")
            && t1.typ == TT::KeywordFunction
            && !t1.preceded_by_line_terminator)
        {
          self.func_decl(true, true)?.into_wrapped()
        } else {
          let expression = self.expr_assign()?;
          self.require_semicolon_or_asi()?;
          Node::new(expression.loc, ExportDefaultExprStmt { expression }).into_wrapped()
        }
      }
      TT::At | TT::KeywordClass => {
        decorators.extend(self.decorators()?);
        self.class_decl(decorators, true, false)?.into_wrapped()
      }
      _ if !decorators.is_empty() => {
        return Err(t0.error(SyntaxErrorType::ExpectedSyntax("class after decorators")));
      }
      TT::KeywordFunction => self.func_decl(true, false)?.into_wrapped(),
      TT::Identifier if is_async_func => self.func_decl(true, false)?.into_wrapped(),
      TT::KeywordConst | TT::KeywordVar => {
        let decl = self.var_decl(true)?;
        self.require_semicolon_or_asi()?;
        decl.into_wrapped()
      }
      TT::Identifier if self.is_contextual(t0, "let") => {
        let decl = self.var_decl(true)?;
        self.require_semicolon_or_asi()?;
        decl.into_wrapped()
      }
      TT::Asterisk => {
        self.consume();
        let alias = if self.consume_if_contextual("as") {
          let a = self.peek();
          let name = self.module_export_name()?;
          Some(Node::new(a.loc, IdPat { name }))
        } else {
          None
        };
        self.require_contextual("from")?;
        let from = Some(self.module_specifier()?);
        self.require_semicolon_or_asi()?;
        Node::new(t0.loc, ExportListStmt {
          names: ExportNames::All(alias),
          from,
        })
        .into_wrapped()
      }
      TT::BraceOpen => {
        self.consume();
        let names = self.list_until_tt(TT::BraceClose, |p| p.export_name())?;
        let from = if self.consume_if_contextual("from") {
          Some(self.module_specifier()?)
        } else {
          None
        };
        self.require_semicolon_or_asi()?;
        Node::new(t0.loc, ExportListStmt {
          names: ExportNames::Specific(names),
          from,
        })
        .into_wrapped()
      }
      _ => return Err(t0.error(SyntaxErrorType::ExpectedSyntax("exportable declaration"))),
    };
    stmt.loc = self.loc_from(start);
    Ok(stmt)
  }
}
