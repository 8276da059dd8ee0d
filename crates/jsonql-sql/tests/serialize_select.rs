use jsonql_sql::{
    stmt::{
        Column, Direction, Expr, ExprExists, ExprInList, ExprInSubquery, ExprLike, Join, Limit,
        OrderBy, Select, SelectItem, TableRef, Value,
    },
    Param, PreparedSql, Serializer, Statement, StatementKind,
};
use pretty_assertions::assert_eq;

fn prepare(select: Select) -> PreparedSql {
    Serializer::new().prepare(&Statement::Select(select))
}

fn user_select() -> Select {
    let mut select = Select::from("user");
    select.columns = vec![
        SelectItem::new(Column::qualified("user", "id"), "id"),
        SelectItem::new(Column::qualified("user", "name"), "name"),
    ];
    select
}

#[test]
fn select_all_columns() {
    let prepared = prepare(Select::from("user"));

    assert_eq!(prepared.sql, r#"SELECT * FROM "user""#);
    assert_eq!(prepared.kind, StatementKind::Select);
    assert!(prepared.params.is_empty());
}

#[test]
fn select_with_filter_sort_and_page() {
    let mut select = user_select();
    select.filter = Some(Expr::eq(Column::qualified("user", "id"), Param::from(1)));
    select.order_by = vec![OrderBy {
        column: Column::qualified("user", "name"),
        direction: Direction::Desc,
    }];
    select.limit = Some(Limit {
        limit: Param::from(10),
        offset: Param::from(0),
    });

    let prepared = prepare(select);

    assert_eq!(
        prepared.sql,
        r#"SELECT "user"."id" AS "id", "user"."name" AS "name" FROM "user" WHERE "user"."id" = ? ORDER BY "user"."name" DESC LIMIT ? OFFSET ?"#
    );
    assert_eq!(
        prepared.params,
        vec![Param::from(1), Param::from(10), Param::from(0)]
    );
    assert_eq!(prepared.placeholder_count(), prepared.params.len());
}

#[test]
fn left_join_with_aliased_columns() {
    let mut select = user_select();
    select
        .columns
        .push(SelectItem::new(Column::qualified("blogs", "title"), "blogs_title"));
    select.joins.push(Join {
        table: TableRef::aliased("blog", "blogs"),
        on: Expr::eq(
            Column::qualified("blogs", "user_id"),
            Column::qualified("user", "id"),
        ),
    });

    let prepared = prepare(select);

    assert_eq!(
        prepared.sql,
        r#"SELECT "user"."id" AS "id", "user"."name" AS "name", "blogs"."title" AS "blogs_title" FROM "user" LEFT JOIN "blog" AS "blogs" ON "blogs"."user_id" = "user"."id""#
    );
}

#[test]
fn params_follow_placeholder_order() {
    let mut select = user_select();
    select.filter = Some(Expr::And(vec![
        ExprInList {
            expr: Box::new(Column::qualified("user", "id").into()),
            list: vec![Param::from(1).into(), Param::from(2).into()],
            negate: false,
        }
        .into(),
        ExprLike {
            expr: Box::new(Column::qualified("user", "name").into()),
            pattern: Box::new(Param::from("%to%").into()),
            negate: true,
        }
        .into(),
    ]));
    select.limit = Some(Limit {
        limit: Param::from(5),
        offset: Param::from(5),
    });

    let prepared = prepare(select);

    assert!(prepared
        .sql
        .ends_with(r#"WHERE "user"."id" IN (?, ?) AND "user"."name" NOT LIKE ? LIMIT ? OFFSET ?"#));
    assert_eq!(
        prepared.params,
        vec![
            Param::from(1),
            Param::from(2),
            Param::from("%to%"),
            Param::from(5),
            Param::from(5),
        ]
    );
    assert_eq!(prepared.placeholder_count(), 5);
}

#[test]
fn subqueries_share_the_parameter_list() {
    let mut inner = Select::from("blog");
    inner.columns = vec![SelectItem {
        column: Column::qualified("blog", "user_id"),
        alias: None,
    }];
    inner.filter = Some(Expr::eq(Column::qualified("blog", "title"), Param::from("t1")));

    let mut select = user_select();
    select.filter = Some(Expr::And(vec![
        Expr::eq(Column::qualified("user", "name"), Param::from("tom")),
        ExprInSubquery {
            expr: Box::new(Column::qualified("user", "id").into()),
            query: Box::new(inner.clone()),
            negate: false,
        }
        .into(),
        ExprExists {
            query: Box::new(inner),
            negate: true,
        }
        .into(),
    ]));

    let prepared = prepare(select);

    assert!(prepared.sql.contains(
        r#""user"."id" IN (SELECT "blog"."user_id" FROM "blog" WHERE "blog"."title" = ?)"#
    ));
    assert!(prepared.sql.contains("NOT EXISTS (SELECT"));
    assert_eq!(
        prepared.params,
        vec![Param::from("tom"), Param::from("t1"), Param::from("t1")]
    );
}

#[test]
fn placeholder_count_skips_quoted_text() {
    let prepared = PreparedSql::new(
        StatementKind::Select,
        r#"SELECT "a?" FROM "t" WHERE "b" = '?' AND "c" = ?"#.to_string(),
        vec![Param::Literal(Value::I64(1))],
    );
    assert_eq!(prepared.placeholder_count(), 1);
}
