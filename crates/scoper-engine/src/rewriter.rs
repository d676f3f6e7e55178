//! Prefixing pass over one parsed file
//!
//! Walks the AST depth-first and emits span edits for:
//! - namespace declarations (prefixed, or inserted for global code)
//! - `use` imports, including grouped and mixed groups
//! - class references: `new`, `extends`, `implements`, trait `use`,
//!   type hints, `catch`, static calls/properties, class constants,
//!   `instanceof`, attributes
//! - function calls and constant references
//! - symbol-shaped strings in array literals
//!
//! Excluded class-likes declared in a moving namespace get a `class_alias`
//! back to their original name.

use mago_span::{HasSpan, Position, Span};
use mago_syntax::ast::*;
use scoper_core::{name, Edit};
use scoper_symbols::registry::is_reserved_constant;
use scoper_symbols::{Classifier, Disposition, Symbol, SymbolKind};

use crate::context::{NameContext, NameForm};
use crate::strings;

const NAMESPACE_KEYWORD: &str = "namespace";

/// Compute the edits moving the program under the classifier's prefix.
pub fn rewrite_program(program: &Program<'_>, source: &str, classifier: &Classifier) -> Vec<Edit> {
    let mut rewriter = Rewriter {
        source,
        classifier,
        context: NameContext::new(),
        moving: false,
        edits: Vec::new(),
    };
    rewriter.check_program(program);
    rewriter.edits
}

struct Rewriter<'s, 'c> {
    source: &'s str,
    classifier: &'c Classifier,
    context: NameContext,
    /// The current namespace declaration was rewritten or inserted
    moving: bool,
    edits: Vec<Edit>,
}

impl<'s, 'c> Rewriter<'s, 'c> {
    fn get_text(&self, span: Span) -> &'s str {
        &self.source[span.start.offset as usize..span.end.offset as usize]
    }

    fn classify(&self, fqn: &str, kind: SymbolKind, span: Span) -> Disposition {
        self.classifier
            .classify(&Symbol::new(fqn, kind).with_span(span))
    }

    /// Built-in type names and class keywords are never symbols.
    fn should_skip_class(&self, class_name: &str) -> bool {
        let lower = class_name.to_lowercase();
        matches!(
            lower.as_str(),
            "int" | "string" | "float" | "bool" | "array" | "object" | "callable"
                | "iterable" | "void" | "mixed" | "null" | "false" | "true" | "never"
                | "self" | "static" | "parent"
        )
    }

    /// Statements a namespace declaration must follow: a shebang or text
    /// before the first `<?php`, the opening tag itself, and bodiless
    /// `declare(...);` directives.
    fn is_preamble(stmt: &Statement<'_>, seen_opening_tag: bool) -> bool {
        match stmt {
            Statement::Inline(_) => !seen_opening_tag,
            Statement::OpeningTag(_) => !seen_opening_tag,
            Statement::Declare(declare) => {
                seen_opening_tag
                    && matches!(declare.body, DeclareBody::Statement(Statement::Noop(_)))
            }
            _ => false,
        }
    }

    /// First statement of global code, where the prefix namespace goes.
    fn first_global_statement<'p, 'a>(program: &'p Program<'a>) -> Option<&'p Statement<'a>> {
        let mut seen_opening_tag = false;
        for stmt in program.statements.iter() {
            if !Self::is_preamble(stmt, seen_opening_tag) {
                return Some(stmt);
            }
            if matches!(stmt, Statement::OpeningTag(_)) {
                seen_opening_tag = true;
            }
        }
        None
    }

    fn check_program(&mut self, program: &Program<'_>) {
        let namespaced = program
            .statements
            .iter()
            .any(|stmt| matches!(stmt, Statement::Namespace(_)));

        if !namespaced {
            self.context.enter_namespace("");
            if let Some(first) = Self::first_global_statement(program) {
                self.edits.push(Edit::insert_before(
                    first.span(),
                    format!("{} {};\n\n", NAMESPACE_KEYWORD, self.classifier.prefix()),
                    "Insert prefix namespace",
                ));
                self.moving = true;
            }
        }

        for stmt in program.statements.iter() {
            self.check_statement(stmt);
        }
    }

    fn check_statement(&mut self, stmt: &Statement<'_>) {
        match stmt {
            Statement::Namespace(ns) => {
                self.check_namespace(ns);
            }
            Statement::Use(use_stmt) => {
                self.check_use(use_stmt);
            }
            Statement::Class(class) => {
                self.check_declaration(class.name.span(), class.span());
                for list in class.attribute_lists.iter() {
                    self.check_attribute_list(list);
                }
                if let Some(ref extends) = class.extends {
                    for parent in extends.types.iter() {
                        self.check_class_name(parent.span());
                    }
                }
                if let Some(ref implements) = class.implements {
                    for iface in implements.types.iter() {
                        self.check_class_name(iface.span());
                    }
                }
                for member in class.members.iter() {
                    self.check_member(member);
                }
            }
            Statement::Interface(iface) => {
                self.check_declaration(iface.name.span(), iface.span());
                for list in iface.attribute_lists.iter() {
                    self.check_attribute_list(list);
                }
                if let Some(ref extends) = iface.extends {
                    for parent in extends.types.iter() {
                        self.check_class_name(parent.span());
                    }
                }
                for member in iface.members.iter() {
                    self.check_member(member);
                }
            }
            Statement::Trait(trait_def) => {
                self.check_declaration(trait_def.name.span(), trait_def.span());
                for list in trait_def.attribute_lists.iter() {
                    self.check_attribute_list(list);
                }
                for member in trait_def.members.iter() {
                    self.check_member(member);
                }
            }
            Statement::Enum(enum_def) => {
                self.check_declaration(enum_def.name.span(), enum_def.span());
                for list in enum_def.attribute_lists.iter() {
                    self.check_attribute_list(list);
                }
                if let Some(ref implements) = enum_def.implements {
                    for iface in implements.types.iter() {
                        self.check_class_name(iface.span());
                    }
                }
                for member in enum_def.members.iter() {
                    self.check_member(member);
                }
            }
            Statement::Function(func) => {
                for list in func.attribute_lists.iter() {
                    self.check_attribute_list(list);
                }
                self.check_function_like_params(&func.parameter_list);
                if let Some(ref ret) = func.return_type_hint {
                    self.check_hint(&ret.hint);
                }
                self.check_block(&func.body);
            }
            Statement::Constant(constant) => {
                for item in constant.items.iter() {
                    self.check_expression(&item.value);
                }
            }
            Statement::Block(block) => {
                self.check_block(block);
            }
            Statement::If(if_stmt) => {
                self.check_expression(&if_stmt.condition);
                self.check_if_body(&if_stmt.body);
            }
            Statement::While(while_stmt) => {
                self.check_expression(&while_stmt.condition);
                self.check_while_body(&while_stmt.body);
            }
            Statement::DoWhile(do_while) => {
                self.check_statement(do_while.statement);
                self.check_expression(&do_while.condition);
            }
            Statement::For(for_stmt) => {
                for init in for_stmt.initializations.iter() {
                    self.check_expression(init);
                }
                for cond in for_stmt.conditions.iter() {
                    self.check_expression(cond);
                }
                for inc in for_stmt.increments.iter() {
                    self.check_expression(inc);
                }
                self.check_for_body(&for_stmt.body);
            }
            Statement::Foreach(foreach_stmt) => {
                self.check_expression(&foreach_stmt.expression);
                self.check_foreach_body(&foreach_stmt.body);
            }
            Statement::Switch(switch_stmt) => {
                self.check_expression(&switch_stmt.expression);
                self.check_switch_body(&switch_stmt.body);
            }
            Statement::Try(try_stmt) => {
                self.check_block(&try_stmt.block);
                for catch in try_stmt.catch_clauses.iter() {
                    self.check_hint(&catch.hint);
                    self.check_block(&catch.block);
                }
                if let Some(ref finally) = try_stmt.finally_clause {
                    self.check_block(&finally.block);
                }
            }
            Statement::Expression(expr_stmt) => {
                self.check_expression(&expr_stmt.expression);
            }
            Statement::Return(ret) => {
                if let Some(ref val) = ret.value {
                    self.check_expression(val);
                }
            }
            Statement::Echo(echo_stmt) => {
                for val in echo_stmt.values.iter() {
                    self.check_expression(val);
                }
            }
            Statement::EchoTag(echo_tag) => {
                for val in echo_tag.values.iter() {
                    self.check_expression(val);
                }
            }
            Statement::Static(static_stmt) => {
                for item in static_stmt.items.iter() {
                    if let StaticItem::Concrete(concrete) = item {
                        self.check_expression(&concrete.value);
                    }
                }
            }
            Statement::Global(global) => {
                for var in global.variables.iter() {
                    self.check_variable(var);
                }
            }
            Statement::Unset(unset) => {
                for val in unset.values.iter() {
                    self.check_expression(val);
                }
            }
            Statement::Declare(declare) => match &declare.body {
                DeclareBody::Statement(inner) => self.check_statement(inner),
                DeclareBody::ColonDelimited(block) => {
                    for inner in block.statements.iter() {
                        self.check_statement(inner);
                    }
                }
            },
            _ => {}
        }
    }

    fn check_namespace(&mut self, ns: &Namespace<'_>) {
        match ns.name {
            Some(ref ns_name) => {
                let span = ns_name.span();
                let namespace = self.get_text(span);
                self.context.enter_namespace(namespace);
                self.moving = self.classifier.classify_namespace(namespace) == Disposition::Prefix;
                if self.moving {
                    let prefixed = self.classifier.prefixed(namespace);
                    self.edits.push(Edit::new(
                        span,
                        prefixed.clone(),
                        format!("Prefix namespace {} to {}", namespace, prefixed),
                    ));
                }
            }
            None => {
                // `namespace { ... }` holds global code
                self.context.enter_namespace("");
                let span = ns.span();
                let keyword = self.get_text(span).get(..NAMESPACE_KEYWORD.len());
                self.moving = keyword.is_some_and(|kw| kw.eq_ignore_ascii_case(NAMESPACE_KEYWORD));
                if self.moving {
                    let at = Position::new(span.start.offset + NAMESPACE_KEYWORD.len() as u32);
                    self.edits.push(Edit::new(
                        Span::new(span.file_id, at, at),
                        format!(" {}", self.classifier.prefix()),
                        "Prefix global namespace block",
                    ));
                }
            }
        }

        let statements = match &ns.body {
            NamespaceBody::Implicit(body) => &body.statements,
            NamespaceBody::BraceDelimited(body) => &body.statements,
        };
        for inner in statements.iter() {
            self.check_statement(inner);
        }
    }

    fn check_use(&mut self, use_stmt: &Use<'_>) {
        match &use_stmt.items {
            UseItems::Sequence(seq) => {
                // use Foo, Bar as Baz;
                for item in seq.items.iter() {
                    self.check_use_item(item, SymbolKind::Class);
                }
            }
            UseItems::TypedSequence(typed_seq) => {
                // use function foo; use const FOO;
                let kind = import_kind(typed_seq.r#type.is_function(), typed_seq.r#type.is_const());
                for item in typed_seq.items.iter() {
                    self.check_use_item(item, kind);
                }
            }
            UseItems::TypedList(typed_list) => {
                // use function Namespace\{foo, bar};
                let kind = import_kind(typed_list.r#type.is_function(), typed_list.r#type.is_const());
                let items: Vec<_> = typed_list.items.iter().map(|item| (kind, item)).collect();
                self.check_use_group(use_stmt.span(), typed_list.namespace.span(), &items);
            }
            UseItems::MixedList(mixed_list) => {
                // use Namespace\{Foo, function bar, const BAZ};
                let items: Vec<_> = mixed_list
                    .items
                    .iter()
                    .map(|maybe_typed| {
                        let kind = maybe_typed
                            .r#type
                            .as_ref()
                            .map_or(SymbolKind::Class, |t| import_kind(t.is_function(), t.is_const()));
                        (kind, &maybe_typed.item)
                    })
                    .collect();
                self.check_use_group(use_stmt.span(), mixed_list.namespace.span(), &items);
            }
        }
    }

    fn check_use_item(&mut self, item: &UseItem<'_>, kind: SymbolKind) {
        let span = item.name.span();
        let fqn = name::trim_leading_separator(self.get_text(span));
        let alias = item.alias.as_ref().map(|a| self.get_text(a.identifier.span()));
        self.context.add_import(kind, fqn, alias);

        if self.classify(fqn, kind, span) == Disposition::Prefix {
            let prefixed = self.classifier.prefixed(fqn);
            self.edits.push(Edit::new(
                span,
                prefixed.clone(),
                format!("Prefix import {} to {}", fqn, prefixed),
            ));
        }
    }

    /// Grouped imports are prefixed through their shared namespace when every
    /// item moves, otherwise split into one `use` per item.
    fn check_use_group(
        &mut self,
        statement_span: Span,
        namespace_span: Span,
        items: &[(SymbolKind, &UseItem<'_>)],
    ) {
        let namespace = name::trim_leading_separator(self.get_text(namespace_span));

        let mut imports = Vec::with_capacity(items.len());
        for (kind, item) in items {
            let span = item.name.span();
            let fqn = name::join(namespace, self.get_text(span));
            let alias = item.alias.as_ref().map(|a| self.get_text(a.identifier.span()));
            self.context.add_import(*kind, &fqn, alias);
            let prefix = self.classify(&fqn, *kind, span) == Disposition::Prefix;
            imports.push((*kind, fqn, alias, prefix));
        }

        let moved = imports.iter().filter(|(_, _, _, prefix)| *prefix).count();
        if moved == 0 {
            return;
        }

        if moved == imports.len() {
            let prefixed = self.classifier.prefixed(namespace);
            self.edits.push(Edit::new(
                namespace_span,
                prefixed.clone(),
                format!("Prefix group import {} to {}", namespace, prefixed),
            ));
            return;
        }

        let statements: Vec<String> = imports
            .iter()
            .map(|(kind, fqn, alias, prefix)| {
                let keyword = match kind {
                    SymbolKind::Class => "",
                    SymbolKind::Function => "function ",
                    SymbolKind::Constant => "const ",
                };
                let target = if *prefix {
                    self.classifier.prefixed(fqn)
                } else {
                    fqn.clone()
                };
                match alias {
                    Some(alias) => format!("use {}{} as {};", keyword, target, alias),
                    None => format!("use {}{};", keyword, target),
                }
            })
            .collect();

        self.edits.push(Edit::new(
            statement_span,
            statements.join("\n"),
            format!("Split mixed group import {}", namespace),
        ));
    }

    /// Declarations move with their namespace. An excluded class-like keeps
    /// its original name through an alias.
    fn check_declaration(&mut self, name_span: Span, declaration_span: Span) {
        if !self.moving {
            return;
        }

        let fqn = name::join(self.context.namespace(), self.get_text(name_span));
        if self.classify(&fqn, SymbolKind::Class, name_span) != Disposition::Exclude {
            return;
        }

        let alias = format!(
            "\n\\class_alias({}, {}, \\false);",
            strings::encode(&self.classifier.prefixed(&fqn), strings::Quote::Single),
            strings::encode(&fqn, strings::Quote::Single),
        );
        self.edits.push(Edit::insert_after(
            declaration_span,
            alias,
            format!("Alias excluded class {}", fqn),
        ));
    }

    fn check_member(&mut self, member: &ClassLikeMember<'_>) {
        match member {
            ClassLikeMember::TraitUse(trait_use) => {
                for trait_name in trait_use.trait_names.iter() {
                    self.check_class_name(trait_name.span());
                }
            }
            ClassLikeMember::Constant(const_member) => {
                for list in const_member.attribute_lists.iter() {
                    self.check_attribute_list(list);
                }
                for item in const_member.items.iter() {
                    self.check_expression(&item.value);
                }
            }
            ClassLikeMember::Property(Property::Plain(prop)) => {
                for list in prop.attribute_lists.iter() {
                    self.check_attribute_list(list);
                }
                if let Some(ref hint) = prop.hint {
                    self.check_hint(hint);
                }
                for item in prop.items.iter() {
                    if let PropertyItem::Concrete(concrete) = item {
                        self.check_expression(&concrete.value);
                    }
                }
            }
            ClassLikeMember::Property(Property::Hooked(hooked)) => {
                for list in hooked.attribute_lists.iter() {
                    self.check_attribute_list(list);
                }
                if let Some(ref hint) = hooked.hint {
                    self.check_hint(hint);
                }
                if let PropertyItem::Concrete(concrete) = &hooked.item {
                    self.check_expression(&concrete.value);
                }
                self.check_property_hooks(&hooked.hook_list);
            }
            ClassLikeMember::EnumCase(enum_case) => {
                for list in enum_case.attribute_lists.iter() {
                    self.check_attribute_list(list);
                }
                if let EnumCaseItem::Backed(backed) = &enum_case.item {
                    self.check_expression(&backed.value);
                }
            }
            ClassLikeMember::Method(method) => {
                for list in method.attribute_lists.iter() {
                    self.check_attribute_list(list);
                }
                self.check_function_like_params(&method.parameter_list);
                if let Some(ref ret) = method.return_type_hint {
                    self.check_hint(&ret.hint);
                }
                if let MethodBody::Concrete(ref body) = method.body {
                    self.check_block(body);
                }
            }
        }
    }

    fn check_property_hooks(&mut self, hook_list: &PropertyHookList<'_>) {
        for hook in hook_list.hooks.iter() {
            for list in hook.attribute_lists.iter() {
                self.check_attribute_list(list);
            }
            if let Some(ref params) = hook.parameter_list {
                self.check_function_like_params(params);
            }
            match &hook.body {
                PropertyHookBody::Concrete(PropertyHookConcreteBody::Block(block)) => {
                    self.check_block(block);
                }
                PropertyHookBody::Concrete(PropertyHookConcreteBody::Expression(body)) => {
                    self.check_expression(&body.expression);
                }
                PropertyHookBody::Abstract(_) => {}
            }
        }
    }

    fn check_attribute_list(&mut self, list: &AttributeList<'_>) {
        for attr in list.attributes.nodes.iter() {
            self.check_class_name(attr.name.span());
            if let Some(ref args) = attr.argument_list {
                self.check_arguments(args);
            }
        }
    }

    fn check_function_like_params(&mut self, params: &FunctionLikeParameterList<'_>) {
        for param in params.parameters.iter() {
            for list in param.attribute_lists.iter() {
                self.check_attribute_list(list);
            }
            if let Some(ref hint) = param.hint {
                self.check_hint(hint);
            }
            if let Some(default) = param.default_value.as_ref() {
                self.check_expression(&default.value);
            }
            if let Some(ref hooks) = param.hooks {
                self.check_property_hooks(hooks);
            }
        }
    }

    fn check_hint(&mut self, hint: &Hint<'_>) {
        match hint {
            Hint::Identifier(ident) => {
                self.check_class_name(ident.span());
            }
            Hint::Nullable(nullable) => {
                self.check_hint(&nullable.hint);
            }
            Hint::Union(union) => {
                self.check_hint(&union.left);
                self.check_hint(&union.right);
            }
            Hint::Intersection(intersection) => {
                self.check_hint(&intersection.left);
                self.check_hint(&intersection.right);
            }
            Hint::Parenthesized(paren) => {
                self.check_hint(&paren.hint);
            }
            _ => {}
        }
    }

    fn check_class_name(&mut self, span: Span) {
        if self.should_skip_class(self.get_text(span)) {
            return;
        }
        self.check_symbol(span, SymbolKind::Class);
    }

    /// Apply the reference rules to a name as written at `span`.
    fn check_symbol(&mut self, span: Span, kind: SymbolKind) {
        let raw = self.get_text(span);
        if kind == SymbolKind::Constant && is_reserved_constant(raw) {
            return;
        }
        let resolved = self.context.resolve(raw, kind);

        // Unqualified functions and constants fall back to the global symbol
        // at runtime. Only global code knows which one it gets.
        if kind != SymbolKind::Class && resolved.form == NameForm::Unqualified {
            if resolved.imported || !self.context.is_global() {
                return;
            }
            if self.classify(&resolved.fqn, kind, span) == Disposition::Prefix {
                let replacement = format!("\\{}", self.classifier.prefixed(&resolved.fqn));
                self.push_reference(span, raw, replacement);
            }
            return;
        }

        match self.classify(&resolved.fqn, kind, span) {
            Disposition::Prefix if !resolved.imported => {
                let replacement = format!("\\{}", self.classifier.prefixed(&resolved.fqn));
                self.push_reference(span, raw, replacement);
            }
            Disposition::Skip | Disposition::Exclude
                if self.moving
                    && !resolved.imported
                    && resolved.form != NameForm::FullyQualified =>
            {
                let replacement = format!("\\{}", resolved.fqn);
                self.push_reference(span, raw, replacement);
            }
            _ => {}
        }
    }

    fn push_reference(&mut self, span: Span, raw: &str, replacement: String) {
        if raw == replacement {
            return;
        }
        let message = format!("Rewrite {} to {}", raw, replacement);
        self.edits.push(Edit::new(span, replacement, message));
    }

    /// Array literal string holding a class or constant name.
    fn check_string_literal(&mut self, span: Span) {
        let Some((quote, value)) = strings::decode(self.get_text(span)) else {
            return;
        };
        if !name::is_valid_symbol_name(&value) {
            return;
        }

        let fqn = name::trim_leading_separator(&value);
        let kind = if value.contains(name::SEPARATOR) {
            SymbolKind::Class
        } else if name::is_constant_like(fqn) {
            SymbolKind::Constant
        } else {
            return;
        };

        let replacement = match self.classify(fqn, kind, span) {
            Disposition::Prefix => self.classifier.prefixed(fqn),
            Disposition::Skip if name::is_fully_qualified(&value) && self.classifier.is_prefixed(fqn) => {
                fqn.to_string()
            }
            _ => return,
        };

        self.edits.push(Edit::new(
            span,
            strings::encode(&replacement, quote),
            format!("Rewrite string {} to {}", value, replacement),
        ));
    }

    fn check_block(&mut self, block: &Block<'_>) {
        for stmt in block.statements.iter() {
            self.check_statement(stmt);
        }
    }

    fn check_if_body(&mut self, body: &IfBody<'_>) {
        match body {
            IfBody::Statement(stmt_body) => {
                self.check_statement(stmt_body.statement);
                for else_if in stmt_body.else_if_clauses.iter() {
                    self.check_expression(&else_if.condition);
                    self.check_statement(else_if.statement);
                }
                if let Some(else_clause) = &stmt_body.else_clause {
                    self.check_statement(else_clause.statement);
                }
            }
            IfBody::ColonDelimited(block) => {
                for inner in block.statements.iter() {
                    self.check_statement(inner);
                }
                for else_if in block.else_if_clauses.iter() {
                    self.check_expression(&else_if.condition);
                    for inner in else_if.statements.iter() {
                        self.check_statement(inner);
                    }
                }
                if let Some(else_clause) = &block.else_clause {
                    for inner in else_clause.statements.iter() {
                        self.check_statement(inner);
                    }
                }
            }
        }
    }

    fn check_while_body(&mut self, body: &WhileBody<'_>) {
        match body {
            WhileBody::Statement(stmt) => {
                self.check_statement(stmt);
            }
            WhileBody::ColonDelimited(block) => {
                for inner in block.statements.iter() {
                    self.check_statement(inner);
                }
            }
        }
    }

    fn check_for_body(&mut self, body: &ForBody<'_>) {
        match body {
            ForBody::Statement(stmt) => {
                self.check_statement(stmt);
            }
            ForBody::ColonDelimited(block) => {
                for inner in block.statements.iter() {
                    self.check_statement(inner);
                }
            }
        }
    }

    fn check_foreach_body(&mut self, body: &ForeachBody<'_>) {
        match body {
            ForeachBody::Statement(stmt) => {
                self.check_statement(stmt);
            }
            ForeachBody::ColonDelimited(block) => {
                for inner in block.statements.iter() {
                    self.check_statement(inner);
                }
            }
        }
    }

    fn check_switch_body(&mut self, body: &SwitchBody<'_>) {
        let cases = match body {
            SwitchBody::BraceDelimited(block) => &block.cases,
            SwitchBody::ColonDelimited(block) => &block.cases,
        };
        for case in cases.iter() {
            match case {
                SwitchCase::Expression(expr_case) => {
                    self.check_expression(&expr_case.expression);
                    for inner in expr_case.statements.iter() {
                        self.check_statement(inner);
                    }
                }
                SwitchCase::Default(default_case) => {
                    for inner in default_case.statements.iter() {
                        self.check_statement(inner);
                    }
                }
            }
        }
    }

    /// Call and instantiation arguments. Arrays passed directly are walked
    /// but their strings are left alone.
    fn check_arguments(&mut self, args: &ArgumentList<'_>) {
        for arg in args.arguments.iter() {
            let value = match arg {
                Argument::Positional(pos) => &pos.value,
                Argument::Named(named) => &named.value,
            };
            self.check_argument_value(value);
        }
    }

    /// `foo(...)` and `foo($a, ?)`: placeholders carry no symbols.
    fn check_partial_arguments(&mut self, args: &PartialArgumentList<'_>) {
        for arg in args.arguments.iter() {
            match arg {
                PartialArgument::Positional(pos) => self.check_argument_value(&pos.value),
                PartialArgument::Named(named) => self.check_argument_value(&named.value),
                _ => {}
            }
        }
    }

    fn check_argument_value(&mut self, value: &Expression<'_>) {
        match value {
            Expression::Array(array) => {
                for element in array.elements.iter() {
                    self.check_array_element(element, false);
                }
            }
            Expression::LegacyArray(array) => {
                for element in array.elements.iter() {
                    self.check_array_element(element, false);
                }
            }
            _ => self.check_expression(value),
        }
    }

    /// Callee of a function call or partial application.
    fn check_callee(&mut self, function: &Expression<'_>) {
        match function {
            Expression::Identifier(ident) => {
                self.check_symbol(ident.span(), SymbolKind::Function);
            }
            _ => self.check_expression(function),
        }
    }

    fn check_variable(&mut self, variable: &Variable<'_>) {
        match variable {
            Variable::Direct(_) => {}
            Variable::Indirect(indirect) => self.check_expression(&indirect.expression),
            Variable::Nested(nested) => self.check_variable(&nested.variable),
        }
    }

    /// `$obj->{expr}` style selectors.
    fn check_member_selector(&mut self, selector: &ClassLikeMemberSelector<'_>) {
        match selector {
            ClassLikeMemberSelector::Identifier(_) => {}
            ClassLikeMemberSelector::Variable(variable) => self.check_variable(variable),
            ClassLikeMemberSelector::Expression(selector) => self.check_expression(&selector.expression),
        }
    }

    fn check_array_element(&mut self, element: &ArrayElement<'_>, strings: bool) {
        match element {
            ArrayElement::KeyValue(kv) => {
                self.check_array_value(&kv.key, strings);
                self.check_array_value(&kv.value, strings);
            }
            ArrayElement::Value(val) => {
                self.check_array_value(&val.value, strings);
            }
            ArrayElement::Variadic(var) => {
                self.check_expression(&var.value);
            }
            _ => {}
        }
    }

    fn check_array_value(&mut self, expr: &Expression<'_>, strings: bool) {
        match expr {
            Expression::Literal(Literal::String(string_lit)) if strings => {
                self.check_string_literal(string_lit.span());
            }
            _ => self.check_expression(expr),
        }
    }

    fn check_expression(&mut self, expr: &Expression<'_>) {
        match expr {
            // new ClassName()
            Expression::Instantiation(inst) => {
                self.check_class_expression(&inst.class);
                if let Some(ref args) = inst.argument_list {
                    self.check_arguments(args);
                }
            }
            Expression::AnonymousClass(class) => {
                if let Some(ref args) = class.argument_list {
                    self.check_arguments(args);
                }
                if let Some(ref extends) = class.extends {
                    for parent in extends.types.iter() {
                        self.check_class_name(parent.span());
                    }
                }
                if let Some(ref implements) = class.implements {
                    for iface in implements.types.iter() {
                        self.check_class_name(iface.span());
                    }
                }
                for member in class.members.iter() {
                    self.check_member(member);
                }
            }
            Expression::Call(Call::Function(call)) => {
                self.check_callee(&call.function);
                self.check_arguments(&call.argument_list);
            }
            Expression::Call(Call::Method(call)) => {
                self.check_expression(&call.object);
                self.check_member_selector(&call.method);
                self.check_arguments(&call.argument_list);
            }
            Expression::Call(Call::NullSafeMethod(call)) => {
                self.check_expression(&call.object);
                self.check_member_selector(&call.method);
                self.check_arguments(&call.argument_list);
            }
            // ClassName::method()
            Expression::Call(Call::StaticMethod(call)) => {
                self.check_class_expression(&call.class);
                self.check_member_selector(&call.method);
                self.check_arguments(&call.argument_list);
            }
            // strlen(...), $obj->method(...), Foo::bar(...)
            Expression::PartialApplication(PartialApplication::Function(app)) => {
                self.check_callee(&app.function);
                self.check_partial_arguments(&app.argument_list);
            }
            Expression::PartialApplication(PartialApplication::Method(app)) => {
                self.check_expression(&app.object);
                self.check_member_selector(&app.method);
                self.check_partial_arguments(&app.argument_list);
            }
            Expression::PartialApplication(PartialApplication::StaticMethod(app)) => {
                self.check_class_expression(&app.class);
                self.check_member_selector(&app.method);
                self.check_partial_arguments(&app.argument_list);
            }
            Expression::Access(Access::StaticProperty(access)) => {
                self.check_class_expression(&access.class);
                self.check_variable(&access.property);
            }
            Expression::Access(Access::ClassConstant(access)) => {
                self.check_class_expression(&access.class);
                if let ClassLikeConstantSelector::Expression(selector) = &access.constant {
                    self.check_expression(&selector.expression);
                }
            }
            Expression::Access(Access::Property(access)) => {
                self.check_expression(&access.object);
                self.check_member_selector(&access.property);
            }
            Expression::Access(Access::NullSafeProperty(access)) => {
                self.check_expression(&access.object);
                self.check_member_selector(&access.property);
            }
            Expression::Variable(variable) => {
                self.check_variable(variable);
            }
            Expression::ConstantAccess(access) => {
                self.check_symbol(access.span(), SymbolKind::Constant);
            }
            Expression::Binary(binary) => {
                self.check_expression(&binary.lhs);
                if matches!(binary.operator, BinaryOperator::Instanceof(_)) {
                    self.check_class_expression(&binary.rhs);
                } else {
                    self.check_expression(&binary.rhs);
                }
            }
            Expression::UnaryPrefix(unary) => {
                self.check_expression(&unary.operand);
            }
            Expression::UnaryPostfix(unary) => {
                self.check_expression(&unary.operand);
            }
            Expression::Parenthesized(paren) => {
                self.check_expression(&paren.expression);
            }
            Expression::Conditional(cond) => {
                self.check_expression(&cond.condition);
                if let Some(ref then_expr) = cond.then {
                    self.check_expression(then_expr);
                }
                self.check_expression(&cond.r#else);
            }
            Expression::Assignment(assign) => {
                self.check_expression(&assign.lhs);
                self.check_expression(&assign.rhs);
            }
            Expression::Closure(closure) => {
                for list in closure.attribute_lists.iter() {
                    self.check_attribute_list(list);
                }
                self.check_function_like_params(&closure.parameter_list);
                if let Some(ref ret) = closure.return_type_hint {
                    self.check_hint(&ret.hint);
                }
                self.check_block(&closure.body);
            }
            Expression::ArrowFunction(arrow) => {
                self.check_function_like_params(&arrow.parameter_list);
                if let Some(ref ret) = arrow.return_type_hint {
                    self.check_hint(&ret.hint);
                }
                self.check_expression(&arrow.expression);
            }
            Expression::Array(array) => {
                for element in array.elements.iter() {
                    self.check_array_element(element, true);
                }
            }
            Expression::LegacyArray(array) => {
                for element in array.elements.iter() {
                    self.check_array_element(element, true);
                }
            }
            Expression::ArrayAccess(access) => {
                self.check_expression(&access.array);
                self.check_expression(&access.index);
            }
            Expression::Match(m) => {
                self.check_expression(&m.expression);
                for arm in m.arms.iter() {
                    match arm {
                        MatchArm::Expression(arm_expr) => {
                            for cond in arm_expr.conditions.iter() {
                                self.check_expression(cond);
                            }
                            self.check_expression(&arm_expr.expression);
                        }
                        MatchArm::Default(arm_default) => {
                            self.check_expression(&arm_default.expression);
                        }
                    }
                }
            }
            Expression::Throw(throw) => {
                self.check_expression(&throw.exception);
            }
            Expression::Clone(clone) => {
                self.check_expression(&clone.object);
            }
            Expression::Construct(Construct::Isset(isset)) => {
                for value in isset.values.iter() {
                    self.check_expression(value);
                }
            }
            Expression::Construct(Construct::Empty(empty)) => {
                self.check_expression(&empty.value);
            }
            Expression::Construct(Construct::Eval(eval)) => {
                self.check_expression(&eval.value);
            }
            Expression::Construct(Construct::Include(include)) => {
                self.check_expression(&include.value);
            }
            Expression::Construct(Construct::IncludeOnce(include)) => {
                self.check_expression(&include.value);
            }
            Expression::Construct(Construct::Require(require)) => {
                self.check_expression(&require.value);
            }
            Expression::Construct(Construct::RequireOnce(require)) => {
                self.check_expression(&require.value);
            }
            Expression::Construct(Construct::Print(print)) => {
                self.check_expression(&print.value);
            }
            Expression::Construct(Construct::Exit(exit)) => {
                if let Some(ref args) = exit.arguments {
                    self.check_arguments(args);
                }
            }
            Expression::Construct(Construct::Die(die)) => {
                if let Some(ref args) = die.arguments {
                    self.check_arguments(args);
                }
            }
            Expression::Yield(Yield::Value(yield_value)) => {
                if let Some(value) = yield_value.value {
                    self.check_expression(value);
                }
            }
            Expression::Yield(Yield::Pair(pair)) => {
                self.check_expression(&pair.key);
                self.check_expression(&pair.value);
            }
            Expression::Yield(Yield::From(from)) => {
                self.check_expression(&from.iterator);
            }
            Expression::List(list) => {
                for element in list.elements.iter() {
                    self.check_array_element(element, false);
                }
            }
            Expression::ArrayAppend(append) => {
                self.check_expression(&append.array);
            }
            Expression::Pipe(pipe) => {
                self.check_expression(&pipe.input);
                self.check_expression(&pipe.callable);
            }
            // "{$x[\Foo::BAR]}": only the embedded expressions
            Expression::CompositeString(composite) => {
                for part in composite.parts().iter() {
                    match part {
                        StringPart::Expression(inner) => self.check_expression(inner),
                        StringPart::BracedExpression(braced) => self.check_expression(&braced.expression),
                        StringPart::Literal(_) => {}
                    }
                }
            }
            _ => {}
        }
    }

    fn check_class_expression(&mut self, class_expr: &Expression<'_>) {
        match class_expr {
            Expression::Identifier(ident) => {
                self.check_class_name(ident.span());
            }
            Expression::ConstantAccess(access) => {
                self.check_class_name(access.span());
            }
            // Dynamic class expression ($class, static, self)
            _ => self.check_expression(class_expr),
        }
    }
}

fn import_kind(is_function: bool, is_const: bool) -> SymbolKind {
    if is_function {
        SymbolKind::Function
    } else if is_const {
        SymbolKind::Constant
    } else {
        SymbolKind::Class
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use mago_database::file::FileId;
    use rstest::rstest;
    use scoper_core::apply_edits;
    use scoper_symbols::{Reflector, Whitelist};

    const NONE: [&str; 0] = [];

    fn classifier(whitelist: &[&str]) -> Classifier {
        let whitelist = Whitelist::new(whitelist.iter().copied(), false, false, NONE, NONE).unwrap();
        Classifier::new("Humbug", Reflector::create_with_phpstorm_stubs(), whitelist).unwrap()
    }

    fn scope_php_with(source: &str, classifier: &Classifier) -> String {
        let arena = Bump::new();
        let file_id = FileId::new("test.php");
        let (program, _) = mago_syntax::parser::parse_file_content(&arena, file_id, source);
        let edits = rewrite_program(program, source, classifier);
        apply_edits(source, &edits).unwrap()
    }

    fn scope_php(source: &str) -> String {
        scope_php_with(source, &classifier(&[]))
    }

    // ==================== Namespace Tests ====================

    #[test]
    fn test_global_file_gets_namespace() {
        let source = "<?php\n\n$x = 1;\n";
        assert_eq!(scope_php(source), "<?php\n\nnamespace Humbug;\n\n$x = 1;\n");
    }

    #[test]
    fn test_namespace_inserted_after_declare() {
        let source = "<?php\ndeclare(strict_types=1);\n\necho 1;\n";
        assert_eq!(
            scope_php(source),
            "<?php\ndeclare(strict_types=1);\n\nnamespace Humbug;\n\necho 1;\n"
        );
    }

    #[test]
    fn test_call_named_like_declare_is_not_preamble() {
        let source = "<?php\ndeclareRoutes();\nclass A {}\n";
        assert_eq!(
            scope_php(source),
            "<?php\nnamespace Humbug;\n\n\\Humbug\\declareRoutes();\nclass A {}\n"
        );
    }

    #[rstest]
    #[case::shebang("#!/usr/bin/env php\n<?php\nfoo();\n", "#!/usr/bin/env php\n<?php\nnamespace Humbug;\n\n\\Humbug\\foo();\n")]
    #[case::inline_text("<html>\n<?php\nnew Foo();\n", "<html>\n<?php\nnamespace Humbug;\n\nnew \\Humbug\\Foo();\n")]
    fn test_namespace_inserted_after_opening_tag(#[case] source: &str, #[case] expected: &str) {
        let once = scope_php(source);
        assert_eq!(once, expected);
        assert_eq!(scope_php(&once), once);
    }

    #[test]
    fn test_empty_file_untouched() {
        assert_eq!(scope_php("<?php\n"), "<?php\n");
    }

    #[test]
    fn test_namespace_prefixed() {
        let source = "<?php\nnamespace App\\Model;\n\nclass User {}\n";
        assert_eq!(
            scope_php(source),
            "<?php\nnamespace Humbug\\App\\Model;\n\nclass User {}\n"
        );
    }

    #[test]
    fn test_unnamed_namespace_block() {
        let source = "<?php\nnamespace {\n    $x = new Foo();\n}\n";
        assert_eq!(
            scope_php(source),
            "<?php\nnamespace Humbug {\n    $x = new \\Humbug\\Foo();\n}\n"
        );
    }

    #[test]
    fn test_already_prefixed_namespace_untouched() {
        let source = "<?php\nnamespace Humbug\\App;\n\nnew Foo();\n";
        assert_eq!(scope_php(source), source);
    }

    // ==================== Class Reference Tests ====================

    #[test]
    fn test_new_in_global_file() {
        let source = "<?php\n\n$x = new X;\n";
        assert_eq!(scope_php(source), "<?php\n\nnamespace Humbug;\n\n$x = new \\Humbug\\X;\n");
    }

    #[test]
    fn test_native_class_anchored_in_moving_namespace() {
        let source = "<?php\n\n$f = new Closure();\n$g = new \\DateTime();\n";
        assert_eq!(
            scope_php(source),
            "<?php\n\nnamespace Humbug;\n\n$f = new \\Closure();\n$g = new \\DateTime();\n"
        );
    }

    #[test]
    fn test_relative_class_reference() {
        let source = "<?php\nnamespace App;\n\nclass A extends Base implements \\Countable {}\n";
        assert_eq!(
            scope_php(source),
            "<?php\nnamespace Humbug\\App;\n\nclass A extends \\Humbug\\App\\Base implements \\Countable {}\n"
        );
    }

    #[test]
    fn test_type_hints() {
        let source = "<?php\nnamespace App;\n\nfunction f(?Foo $a, int|\\Bar $b): self {}\n";
        assert_eq!(
            scope_php(source),
            "<?php\nnamespace Humbug\\App;\n\nfunction f(?\\Humbug\\App\\Foo $a, int|\\Humbug\\Bar $b): self {}\n"
        );
    }

    #[test]
    fn test_static_access_and_instanceof() {
        let source = "<?php\nnamespace App;\n\nif ($x instanceof \\Vendor\\Foo) {\n    \\Vendor\\Foo::make(\\Vendor\\Foo::BAR);\n}\n";
        assert_eq!(
            scope_php(source),
            "<?php\nnamespace Humbug\\App;\n\nif ($x instanceof \\Humbug\\Vendor\\Foo) {\n    \\Humbug\\Vendor\\Foo::make(\\Humbug\\Vendor\\Foo::BAR);\n}\n"
        );
    }

    #[test]
    fn test_catch_type() {
        let source = "<?php\nnamespace App;\n\ntry {\n} catch (\\Vendor\\Error | \\RuntimeException $e) {\n}\n";
        assert_eq!(
            scope_php(source),
            "<?php\nnamespace Humbug\\App;\n\ntry {\n} catch (\\Humbug\\Vendor\\Error | \\RuntimeException $e) {\n}\n"
        );
    }

    #[test]
    fn test_excluded_class_kept() {
        let source = "<?php\nnamespace App;\n\nnew \\Acme\\Kept();\n";
        let classifier = classifier(&["Acme\\Kept"]);
        assert_eq!(scope_php_with(source, &classifier), "<?php\nnamespace Humbug\\App;\n\nnew \\Acme\\Kept();\n");
    }

    // ==================== Import Tests ====================

    #[test]
    fn test_use_statement_prefixed() {
        let source = "<?php\nnamespace App;\n\nuse Vendor\\Lib\\Client;\nuse Closure;\n\nnew Client();\n";
        assert_eq!(
            scope_php(source),
            "<?php\nnamespace Humbug\\App;\n\nuse Humbug\\Vendor\\Lib\\Client;\nuse Closure;\n\nnew Client();\n"
        );
    }

    #[test]
    fn test_use_function_and_const() {
        let source = "<?php\nnamespace App;\n\nuse function Vendor\\helper;\nuse const Vendor\\LEVEL;\n\nhelper(LEVEL);\n";
        assert_eq!(
            scope_php(source),
            "<?php\nnamespace Humbug\\App;\n\nuse function Humbug\\Vendor\\helper;\nuse const Humbug\\Vendor\\LEVEL;\n\nhelper(LEVEL);\n"
        );
    }

    #[test]
    fn test_group_import_prefixed_through_namespace() {
        let source = "<?php\nnamespace App;\n\nuse Vendor\\{Foo, Bar as Baz};\n";
        assert_eq!(
            scope_php(source),
            "<?php\nnamespace Humbug\\App;\n\nuse Humbug\\Vendor\\{Foo, Bar as Baz};\n"
        );
    }

    #[test]
    fn test_mixed_group_import_is_split() {
        let source = "<?php\nnamespace App;\n\nuse Vendor\\{Foo, Kept as K};\n";
        let classifier = classifier(&["Vendor\\Kept"]);
        assert_eq!(
            scope_php_with(source, &classifier),
            "<?php\nnamespace Humbug\\App;\n\nuse Humbug\\Vendor\\Foo;\nuse Vendor\\Kept as K;\n"
        );
    }

    // ==================== Function / Constant Tests ====================

    #[test]
    fn test_global_function_calls() {
        let source = "<?php\n\nstrlen('x');\nhelper();\n\\Vendor\\run();\n";
        assert_eq!(
            scope_php(source),
            "<?php\n\nnamespace Humbug;\n\nstrlen('x');\n\\Humbug\\helper();\n\\Humbug\\Vendor\\run();\n"
        );
    }

    #[test]
    fn test_unqualified_calls_in_namespace_untouched() {
        let source = "<?php\nnamespace App;\n\nhelper(FOO, PHP_EOL, true);\n";
        assert_eq!(scope_php(source), "<?php\nnamespace Humbug\\App;\n\nhelper(FOO, PHP_EOL, true);\n");
    }

    #[test]
    fn test_global_constants() {
        let source = "<?php\n\necho FOO, PHP_EOL, null;\n";
        assert_eq!(
            scope_php(source),
            "<?php\n\nnamespace Humbug;\n\necho \\Humbug\\FOO, PHP_EOL, null;\n"
        );
    }

    // ==================== Declaration Tests ====================

    #[test]
    fn test_excluded_class_gets_alias() {
        let source = "<?php\nnamespace Acme;\n\nclass Kept {}\n";
        let classifier = classifier(&["Acme\\Kept"]);
        assert_eq!(
            scope_php_with(source, &classifier),
            "<?php\nnamespace Humbug\\Acme;\n\nclass Kept {}\n\\class_alias('Humbug\\\\Acme\\\\Kept', 'Acme\\\\Kept', \\false);\n"
        );
    }

    #[test]
    fn test_excluded_global_class_alias_is_stable() {
        let source = "<?php\n\nclass Kept {}\n";
        let classifier = classifier(&["Kept"]);

        let once = scope_php_with(source, &classifier);
        assert_eq!(
            once,
            "<?php\n\nnamespace Humbug;\n\nclass Kept {}\n\\class_alias('Humbug\\\\Kept', 'Kept', \\false);\n"
        );
        assert_eq!(scope_php_with(&once, &classifier), once);
    }

    #[test]
    fn test_user_class_alias_call_untouched() {
        let source = "<?php\n\nclass_alias('A', 'B');\n";
        assert_eq!(scope_php(source), "<?php\n\nnamespace Humbug;\n\nclass_alias('A', 'B');\n");
    }

    #[test]
    fn test_excluded_namespace_does_not_move() {
        let source = "<?php\nnamespace Acme\\Lib;\n\nclass Kept extends Base {}\n";
        let classifier = classifier(&["Acme\\*"]);
        assert_eq!(scope_php_with(source, &classifier), source);
    }

    // ==================== String Literal Tests ====================

    #[test]
    fn test_array_strings() {
        let source = "<?php\n\n$map = ['Vendor\\\\Foo' => \"\\\\Humbug\\\\Bar\", 'Closure', 'FOO', 'PHP_EOL'];\n";
        assert_eq!(
            scope_php(source),
            "<?php\n\nnamespace Humbug;\n\n$map = ['Humbug\\\\Vendor\\\\Foo' => \"Humbug\\\\Bar\", 'Closure', 'Humbug\\\\FOO', 'PHP_EOL'];\n"
        );
    }

    #[test]
    fn test_strings_outside_arrays_untouched() {
        let source = "<?php\nnamespace App;\n\n$a = 'Vendor\\\\Foo';\nclass_exists('Vendor\\\\Foo');\nf(['Vendor\\\\Foo']);\n";
        assert_eq!(
            scope_php(source),
            "<?php\nnamespace Humbug\\App;\n\n$a = 'Vendor\\\\Foo';\nclass_exists('Vendor\\\\Foo');\nf(['Vendor\\\\Foo']);\n"
        );
    }

    #[test]
    fn test_nested_array_in_argument() {
        let source = "<?php\nnamespace App;\n\nf(['key' => ['Vendor\\\\Foo']]);\n";
        assert_eq!(
            scope_php(source),
            "<?php\nnamespace Humbug\\App;\n\nf(['key' => ['Humbug\\\\Vendor\\\\Foo']]);\n"
        );
    }

    #[test]
    fn test_prefix_matches_case_insensitively() {
        let source = "<?php\nnamespace App;\n\n$map = ['humbug\\\\Foo', '\\\\HUMBUG\\\\Bar'];\nnew \\humbug\\Baz();\n";
        assert_eq!(
            scope_php(source),
            "<?php\nnamespace Humbug\\App;\n\n$map = ['humbug\\\\Foo', 'HUMBUG\\\\Bar'];\nnew \\humbug\\Baz();\n"
        );
    }

    // ==================== Node Coverage ====================

    #[rstest]
    #[case::yield_value(r"function gen() { yield new \Vendor\Foo(); }", r"function gen() { yield new \Humbug\Vendor\Foo(); }")]
    #[case::yield_pair(r"function gen() { yield \Vendor\Foo::KEY => \Vendor\Foo::VALUE; }", r"function gen() { yield \Humbug\Vendor\Foo::KEY => \Humbug\Vendor\Foo::VALUE; }")]
    #[case::yield_from(r"function gen() { yield from \Vendor\items(); }", r"function gen() { yield from \Humbug\Vendor\items(); }")]
    #[case::exit(r"exit(\Vendor\Code::X);", r"exit(\Humbug\Vendor\Code::X);")]
    #[case::die(r"die(\Vendor\Code::X);", r"die(\Humbug\Vendor\Code::X);")]
    #[case::require(r"require \Vendor\Paths::FILE;", r"require \Humbug\Vendor\Paths::FILE;")]
    #[case::include_once(r"include_once \Vendor\Paths::FILE;", r"include_once \Humbug\Vendor\Paths::FILE;")]
    #[case::print(r"print \Vendor\Foo::X;", r"print \Humbug\Vendor\Foo::X;")]
    #[case::eval(r"eval(\Vendor\Foo::CODE);", r"eval(\Humbug\Vendor\Foo::CODE);")]
    #[case::first_class_callable(r"$f = \Vendor\helper(...);", r"$f = \Humbug\Vendor\helper(...);")]
    #[case::static_callable(r"$f = \Vendor\Foo::create(...);", r"$f = \Humbug\Vendor\Foo::create(...);")]
    #[case::enum_case(r"enum Suit: string { case A = \Vendor\Foo::BAR; }", r"enum Suit: string { case A = \Humbug\Vendor\Foo::BAR; }")]
    #[case::static_var(r"function f() { static $x = \Vendor\Foo::X; }", r"function f() { static $x = \Humbug\Vendor\Foo::X; }")]
    #[case::nullsafe_call(r"$a?->b(\Vendor\Foo::X);", r"$a?->b(\Humbug\Vendor\Foo::X);")]
    #[case::nullsafe_property(r"$a?->{\Vendor\Foo::NAME};", r"$a?->{\Humbug\Vendor\Foo::NAME};")]
    #[case::dynamic_method(r"$a->{\Vendor\Foo::METHOD}();", r"$a->{\Humbug\Vendor\Foo::METHOD}();")]
    #[case::unset(r"unset($x[\Vendor\Foo::X]);", r"unset($x[\Humbug\Vendor\Foo::X]);")]
    #[case::declare_block(r"declare(ticks=1) { new \Vendor\Foo(); }", r"declare(ticks=1) { new \Humbug\Vendor\Foo(); }")]
    #[case::property_hook(r"class A { public string $name { get => \Vendor\Foo::NAME; } }", r"class A { public string $name { get => \Humbug\Vendor\Foo::NAME; } }")]
    #[case::interpolation(r#"$s = "v: {$map[\Vendor\Foo::KEY]}";"#, r#"$s = "v: {$map[\Humbug\Vendor\Foo::KEY]}";"#)]
    fn test_nested_nodes_are_rewritten(#[case] code: &str, #[case] expected: &str) {
        let source = format!("<?php\n\n{}\n", code);
        assert_eq!(
            scope_php(&source),
            format!("<?php\n\nnamespace Humbug;\n\n{}\n", expected)
        );
    }

    #[test]
    fn test_native_class_anchored_inside_yield() {
        let source = "<?php\n\n$x = new Closure(fn() => yield new Closure());\n";
        assert_eq!(
            scope_php(source),
            "<?php\n\nnamespace Humbug;\n\n$x = new \\Closure(fn() => yield new \\Closure());\n"
        );
    }

    // ==================== Idempotence ====================

    #[test]
    fn test_rewrite_is_idempotent() {
        let source = "<?php\n\nuse Vendor\\Lib;\n\n$x = new X;\n$y = ['\\\\Vendor\\\\Foo', 'FOO'];\nhelper(Lib\\Client::VERSION);\n";
        let once = scope_php(source);
        assert_eq!(scope_php(&once), once);
    }
}
